//! This module contains [`ParticleError`].

use glam::Vec3;
use thiserror::Error;

/// The error returned when a particle generator is given a configuration that can't produce
/// sensible geometry.
#[derive(Clone, Debug, PartialEq, Error)]
#[allow(missing_docs, reason = "the #[error] attributes document the variants")]
pub enum ParticleError {
    #[error("the height must be positive and finite, but it was {0}")]
    DegenerateHeight(f32),

    #[error("the radius must be positive and finite, but it was {0}")]
    DegenerateRadius(f32),

    #[error("the bounds must be positive and finite on every axis, but they were {0}")]
    DegenerateBounds(Vec3),

    #[error("the speed range {min}..={max} is empty, negative, or not finite")]
    InvalidSpeedRange { min: f32, max: f32 },
}

/// Return `Ok(())` if the value is positive and finite, or the error made by `make_err` otherwise.
pub(crate) fn ensure_positive(
    value: f32,
    make_err: fn(f32) -> ParticleError,
) -> Result<(), ParticleError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(make_err(value))
    }
}
