//! This module contains [`Tick`].

/// The timing information for one frame of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// The number of seconds since the last tick. Never negative and never NaN.
    dt: f32,

    /// The number of seconds since the scene started.
    time: f32,
}

impl Tick {
    /// Create a new tick.
    ///
    /// A `dt` that is negative, NaN, or infinite is clamped to zero, so a bad frame time can only
    /// ever freeze the scene for one frame.
    pub fn new(dt: f32, time: f32) -> Self {
        let dt = if dt.is_finite() { dt.max(0.) } else { 0. };
        Self { dt, time }
    }

    /// The number of seconds since the last tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// The number of seconds since the scene started.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_clamps_dt_test() {
        assert_eq!(Tick::new(0.5, 3.).dt(), 0.5);
        assert_eq!(Tick::new(-0.5, 3.).dt(), 0.);
        assert_eq!(Tick::new(f32::NAN, 3.).dt(), 0.);
        assert_eq!(Tick::new(f32::INFINITY, 3.).dt(), 0.);
        assert_eq!(Tick::new(f32::NEG_INFINITY, 3.).time(), 3.);
    }
}
