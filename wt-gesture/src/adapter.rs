//! This module contains [`GestureInputAdapter`], which turns hand snapshots into smoothed scene
//! controls.

use crate::{HandSnapshot, MIDDLE_FINGER_KNUCKLE, PINKY_TIP, THUMB_TIP};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;
use wt_animation::approach;

/// The config for gesture tracking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// The keypoint at one side of the hand.
    pub thumb_keypoint: usize,

    /// The keypoint at the other side of the hand.
    pub pinky_keypoint: usize,

    /// The keypoint whose position drives the rotation.
    pub reference_keypoint: usize,

    /// The hand counts as open when the thumb and pinky are further apart than this, as a
    /// proportion of the frame.
    pub open_threshold: f32,

    /// How far the scene turns about the vertical axis per unit of horizontal offset from the
    /// centre of the frame.
    pub yaw_scale: f32,

    /// How far the scene tilts per unit of vertical offset from the centre of the frame.
    pub pitch_scale: f32,

    /// The scale of the scene while the hand is open.
    pub open_scale: f32,

    /// The scale of the scene while the hand is closed.
    pub closed_scale: f32,

    /// The per-frame smoothing factor of the scale.
    pub scale_smoothing: f32,

    /// The per-frame smoothing factor of the rotation.
    pub rotation_smoothing: f32,

    /// How often to poll the keypoint source, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            thumb_keypoint: THUMB_TIP,
            pinky_keypoint: PINKY_TIP,
            reference_keypoint: MIDDLE_FINGER_KNUCKLE,
            open_threshold: 0.4,
            yaw_scale: 2.2,
            pitch_scale: 1.,
            open_scale: 2.5,
            closed_scale: 1.,
            scale_smoothing: 0.1,
            rotation_smoothing: 0.05,
            poll_interval_ms: 33,
        }
    }
}

/// What the hand is currently telling the scene to do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    /// Is the hand open?
    pub is_open: bool,

    /// The rotation that the scene should turn towards, as a pitch about the X axis in `x` and a
    /// yaw about the Y axis in `y`.
    pub rotation_target: Vec2,
}

impl GestureState {
    /// Interpret a hand snapshot, or return `None` if it doesn't have the keypoints we need.
    pub fn from_snapshot(snapshot: &HandSnapshot, config: &GestureConfig) -> Option<Self> {
        let spread = snapshot.planar_distance(config.thumb_keypoint, config.pinky_keypoint)?;
        let reference = snapshot.keypoint(config.reference_keypoint)?;

        Some(Self {
            is_open: spread > config.open_threshold,
            rotation_target: Vec2::new(
                (reference.y - 0.5) * config.pitch_scale,
                (reference.x - 0.5) * config.yaw_scale,
            ),
        })
    }
}

/// Turns hand snapshots into a smoothed scale and rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureInputAdapter {
    /// The latest interpreted gesture.
    state: GestureState,

    /// The current smoothed scale.
    scale: f32,

    /// The current smoothed rotation, with pitch in `x` and yaw in `y`.
    rotation: Vec2,
}

impl GestureInputAdapter {
    /// Create a new adapter for a closed hand in the middle of the frame.
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            state: GestureState::default(),
            scale: config.closed_scale,
            rotation: Vec2::ZERO,
        }
    }

    /// Take in a new snapshot from the detector.
    ///
    /// A snapshot without the keypoints we need is ignored, so the previous state stays as it
    /// was. Returns whether the snapshot was used.
    pub fn observe(&mut self, snapshot: &HandSnapshot, config: &GestureConfig) -> bool {
        match GestureState::from_snapshot(snapshot, config) {
            Some(state) => {
                trace!(?state, "Observed hand");
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Smooth the scale and rotation towards the current state over `dt` seconds.
    ///
    /// The rotation only follows the hand while tracking is enabled. Otherwise, it's left where
    /// it is and the camera handles rotation by itself. The scale keeps following the last
    /// gesture either way, so a hand that was open when tracking stopped leaves the scene zoomed
    /// in.
    pub fn tick(&mut self, config: &GestureConfig, dt: f32, tracking_enabled: bool) {
        let target_scale = if self.state.is_open {
            config.open_scale
        } else {
            config.closed_scale
        };
        self.scale = approach(self.scale, target_scale, config.scale_smoothing, dt);

        if tracking_enabled {
            self.rotation = approach(
                self.rotation,
                self.state.rotation_target,
                config.rotation_smoothing,
                dt,
            );
        }
    }

    /// The latest interpreted gesture.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The current smoothed scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The current smoothed rotation, with pitch in `x` and yaw in `y`.
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }
}
