//! This module contains easing and smoothing functions.

use std::ops::{Add, Mul, Sub};

/// The frame rate that every smoothing factor is specified at.
pub const REFERENCE_FPS: f32 = 60.;

/// A symmetric cubic ease. It accelerates like `4t^3` for the first half and decelerates like the
/// mirror image of that for the second half.
///
/// The input is clamped to [0, 1].
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0., 1.);

    if t < 0.5 {
        4. * t * t * t
    } else {
        1. - (-2. * t + 2.).powi(3) / 2.
    }
}

/// Get the proportion of the remaining distance to cover in `dt` seconds for a smoothing factor
/// `k` which is specified per frame at [`REFERENCE_FPS`].
///
/// This is exactly `k` for a 60 fps frame and zero for an empty one, and applying it to two half
/// frames gives the same result as applying it to one whole frame.
pub fn smoothing_factor(k: f32, dt: f32) -> f32 {
    let k = k.clamp(0., 1.);
    let dt = dt.max(0.);

    1. - (1. - k).powf(dt * REFERENCE_FPS)
}

/// Move `current` towards `target` by the smoothing factor `k` over `dt` seconds.
///
/// This never overshoots the target.
pub fn approach<T>(current: T, target: T, k: f32, dt: f32) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    current + (target - current) * smoothing_factor(k, dt)
}
