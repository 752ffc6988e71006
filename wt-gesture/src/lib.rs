//! This crate interprets hand keypoints from an external detector and turns them into smoothed
//! controls for the scene: a scale that grows when the hand opens, and a rotation that follows
//! the hand around.
//!
//! The detector itself is anything that implements [`KeypointSource`]. It runs on its own thread
//! inside a [`TrackingSession`], and the scene polls the latest result once per tick without ever
//! blocking on it.

mod adapter;
mod error;
mod keypoints;
mod scripted;
mod session;
mod tracker;

pub use self::{
    adapter::{GestureConfig, GestureInputAdapter, GestureState},
    error::DetectorError,
    keypoints::{HandSnapshot, HAND_KEYPOINT_COUNT, MIDDLE_FINGER_KNUCKLE, PINKY_TIP, THUMB_TIP},
    scripted::{KeypointScript, ScriptedSource},
    session::{DetectorUpdate, KeypointSource, TrackingSession},
    tracker::{GestureTracker, SourceFactory},
};
