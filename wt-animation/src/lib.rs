//! This crate provides the animators that move every dynamic object in the scene, along with the
//! easing and smoothing maths that they share.
//!
//! Every animator is an explicit state machine advanced by [`Animator::tick`]. The animators never
//! hold on to anything outside of themselves, so the scene can tick them in any order.

mod bezier;
mod easing;
mod gift;
mod ornament;
mod scenery;
mod tick;
mod traits;
mod wish;

pub use self::{
    bezier::QuadraticBezier,
    easing::{approach, ease_in_out_cubic, smoothing_factor, REFERENCE_FPS},
    gift::{FallAndSettle, FallConfig, FallEvent, FallPhase},
    ornament::{MaterializeAndIdle, MaterializeConfig, OrnamentEvent, OrnamentPhase},
    scenery::{TopperSpin, TreePulse},
    tick::Tick,
    traits::{Animator, HoverLevel, Hoverable},
    wish::{FlightConfig, FlightEvent, FlightPhase, FlightWithTrail, TrailBuffer},
};
