//! This module handles colours.

use glam::Vec3;

/// An RGB colour.
pub type RGBArray = [u8; 3];

/// Convert an [`RGBArray`] into a `Vec3` with every component in [0, 1].
pub fn rgb_to_vec3([r, g, b]: RGBArray) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32) / 255.
}

/// Convert a `Vec3` colour back into an [`RGBArray`], clamping components that lie outside of
/// [0, 1].
pub fn vec3_to_rgb(colour: Vec3) -> RGBArray {
    let [r, g, b] = (colour.clamp(Vec3::ZERO, Vec3::ONE) * 255.).round().to_array();
    [r as u8, g as u8, b as u8]
}

/// Linearly interpolate from `from` towards `to` by `weight`.
///
/// The weight is not clamped, so a weight outside of [0, 1] extrapolates.
#[inline]
pub fn lerp_colour(from: Vec3, to: Vec3, weight: f32) -> Vec3 {
    from.lerp(to, weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn rgb_conversion_test() {
        assert_eq!(rgb_to_vec3([255, 0, 255]), Vec3::new(1., 0., 1.));
        assert!(approx_eq!(f32, rgb_to_vec3([255, 128, 192]).y, 128. / 255.));

        for colour in [[255, 128, 192], [0, 0, 0], [255, 224, 237], [1, 2, 3]] {
            assert_eq!(vec3_to_rgb(rgb_to_vec3(colour)), colour);
        }

        assert_eq!(vec3_to_rgb(Vec3::new(1.5, -0.2, 0.5)), [255, 0, 128]);
    }

    #[test]
    fn lerp_colour_test() {
        let white = Vec3::ONE;
        let black = Vec3::ZERO;

        assert_eq!(lerp_colour(black, white, 0.), black);
        assert_eq!(lerp_colour(black, white, 1.), white);
        assert!(approx_eq!(f32, lerp_colour(black, white, 0.25).x, 0.25));
    }
}
