//! This module contains [`SceneError`] and [`PlacementError`].

use std::io;
use thiserror::Error;
use wt_particles::ParticleError;

/// The error returned when the scene can't be built or its config can't be saved.
#[derive(Debug, Error)]
#[allow(missing_docs, reason = "the #[error] attributes document the variants")]
pub enum SceneError {
    #[error("unable to generate particles: {0}")]
    Particles(#[from] ParticleError),

    #[error("invalid placement config: {0}")]
    InvalidPlacement(#[from] PlacementError),

    #[error("unable to access the config file: {0}")]
    Io(#[from] io::Error),

    #[error("unable to parse the config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("unable to serialize the config: {0}")]
    Serialize(#[from] ron::Error),
}

/// The error returned when a placement config could put a decoration inside the tree or place
/// gifts out of order.
#[derive(Clone, Debug, PartialEq, Error)]
#[allow(missing_docs, reason = "the #[error] attributes document the variants")]
pub enum PlacementError {
    #[error("the {ring} ring must have 1 < min_multiplier <= max_multiplier, but it has {min}..={max}")]
    RingInsideTree {
        ring: &'static str,
        min: f32,
        max: f32,
    },

    #[error("the {ring} ring must have 0 <= angle_jitter < angle_step, but it has jitter {jitter} and step {step}")]
    JitterOverlapsStep {
        ring: &'static str,
        jitter: f32,
        step: f32,
    },

    #[error("the surface margin must not be negative, but it is {0}")]
    NegativeSurfaceMargin(f32),
}
