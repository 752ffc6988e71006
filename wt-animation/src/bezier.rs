//! This module contains [`QuadraticBezier`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A quadratic Bezier curve with a single control point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    /// Where the curve starts.
    pub start: Vec3,

    /// The point that the curve is pulled towards.
    pub control: Vec3,

    /// Where the curve ends.
    pub end: Vec3,
}

impl QuadraticBezier {
    /// Get the point on the curve at the parameter `t`, which is clamped to [0, 1].
    pub fn point_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0., 1.);
        let u = 1. - t;

        u * u * self.start + 2. * u * t * self.control + t * t * self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_test() {
        let curve = QuadraticBezier {
            start: Vec3::new(0., -6., 12.),
            control: Vec3::new(12., 10., 8.),
            end: Vec3::new(0., 15.5, 0.),
        };

        assert_eq!(curve.point_at(0.), curve.start);
        assert_eq!(curve.point_at(1.), curve.end);
        assert_eq!(curve.point_at(2.), curve.end);

        // The midpoint is half way between the control point and the midpoint of the ends
        let expected = 0.5 * curve.control + 0.25 * (curve.start + curve.end);
        assert!(curve.point_at(0.5).abs_diff_eq(expected, 1e-5));
    }
}
