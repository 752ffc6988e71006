//! This module generates the cone of particles that makes up the tree.

use crate::{error::ensure_positive, ParticleError, ParticlePointSet};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::{debug, instrument};
use wt_frame::{lerp_colour, rgb_to_vec3, RGBArray};

/// The exponent applied to a uniform sample to get the radial distance of a particle.
///
/// Being less than 1 pushes particles towards the surface of the cone, which makes the outside
/// of the tree denser than the inside.
const RADIAL_EXPONENT: f32 = 0.7;

/// The config for the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// How many particles make up the tree.
    pub particle_count: usize,

    /// The height of the tip of the tree above its base.
    pub height: f32,

    /// The radius of the base of the tree.
    pub base_radius: f32,

    /// The colour of the core of the tree.
    pub centre_colour: RGBArray,

    /// The colour that the middle of the tree blends towards.
    pub outer_colour: RGBArray,

    /// The colour of the outermost shell of the tree.
    pub edge_colour: RGBArray,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            particle_count: 20_000,
            height: 15.,
            base_radius: 5.,
            centre_colour: [255, 128, 192],
            outer_colour: [255, 224, 237],
            edge_colour: [255, 255, 255],
        }
    }
}

impl TreeConfig {
    /// Check that this config describes a real cone.
    pub fn validate(&self) -> Result<(), ParticleError> {
        ensure_positive(self.height, ParticleError::DegenerateHeight)?;
        ensure_positive(self.base_radius, ParticleError::DegenerateRadius)
    }

    /// The radius of the cone at the given height above the base.
    ///
    /// This is zero at and above the tip.
    pub fn radius_at_height(&self, height: f32) -> f32 {
        ((1. - height / self.height) * self.base_radius).max(0.)
    }
}

/// Get the colour of a tree particle from how far out it is, as a proportion of the radius of the
/// cone at its height.
///
/// Everything inside 40% of the way out is the centre colour. Past that, the colour blends towards
/// the outer colour, and past 80% it blends further towards the edge colour.
pub fn shell_colour(radial_factor: f32, centre: Vec3, outer: Vec3, edge: Vec3) -> Vec3 {
    let mut colour = centre;

    if radial_factor > 0.4 {
        colour = lerp_colour(colour, outer, (radial_factor - 0.4) * 1.5);
    }
    if radial_factor > 0.8 {
        colour = lerp_colour(colour, edge, (radial_factor - 0.8) * 4.);
    }

    colour
}

/// Generate the particles for the tree.
///
/// Each particle gets a uniformly random height and angle, and a radial distance biased towards
/// the surface of the cone at that height.
#[instrument(skip(rng))]
pub fn generate_tree<R: Rng + ?Sized>(
    config: &TreeConfig,
    rng: &mut R,
) -> Result<ParticlePointSet, ParticleError> {
    config.validate()?;

    let centre = rgb_to_vec3(config.centre_colour);
    let outer = rgb_to_vec3(config.outer_colour);
    let edge = rgb_to_vec3(config.edge_colour);

    let mut positions = Vec::with_capacity(config.particle_count);
    let mut colours = Vec::with_capacity(config.particle_count);

    for _ in 0..config.particle_count {
        let height = rng.gen_range(0.0..config.height);
        let radius_at_h = config.radius_at_height(height);
        let angle = rng.gen_range(0.0..TAU);
        let dist = rng.gen::<f32>().powf(RADIAL_EXPONENT) * radius_at_h;

        positions.push(Vec3::new(angle.cos() * dist, height, angle.sin() * dist));

        let radial_factor = if radius_at_h > 0. {
            dist / radius_at_h
        } else {
            0.
        };
        colours.push(shell_colour(radial_factor, centre, outer, edge));
    }

    debug!(count = positions.len(), "Generated tree particles");
    Ok(ParticlePointSet::new(positions, colours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use glam::Vec2;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn particles_lie_inside_cone_test() {
        let config = TreeConfig {
            particle_count: 5000,
            ..TreeConfig::default()
        };
        let tree = generate_tree(&config, &mut StdRng::seed_from_u64(12345)).unwrap();

        assert_eq!(tree.len(), 5000);
        assert_eq!(tree.colours().len(), 5000);

        for position in tree.positions() {
            let h = position.y;
            assert!((0.0..config.height).contains(&h));

            let radius_at_h = (1. - h / config.height) * config.base_radius;
            assert!(approx_eq!(
                f32,
                config.radius_at_height(h),
                radius_at_h,
                epsilon = 1e-5
            ));

            let dist = Vec2::new(position.x, position.z).length();
            assert!(dist >= 0.);
            assert!(
                dist <= radius_at_h + 1e-4,
                "Particle {position} is outside the cone radius {radius_at_h}"
            );
        }
    }

    #[test]
    fn particles_are_denser_near_surface_test() {
        let tree = generate_tree(&TreeConfig::default(), &mut StdRng::seed_from_u64(12345)).unwrap();
        let config = TreeConfig::default();

        let outer_half = tree
            .positions()
            .iter()
            .filter(|p| {
                let radius_at_h = config.radius_at_height(p.y);
                Vec2::new(p.x, p.z).length() > 0.5 * radius_at_h
            })
            .count();

        // With a uniform sample this would be 50%, but the exponent of 0.7 gives 1 - 0.5^(1/0.7),
        // which is about 63%
        let proportion = outer_half as f32 / tree.len() as f32;
        assert!(proportion > 0.58 && proportion < 0.68, "{proportion}");
    }

    #[test]
    fn shell_colour_test() {
        let centre = rgb_to_vec3([255, 128, 192]);
        let outer = rgb_to_vec3([255, 224, 237]);
        let edge = Vec3::ONE;

        assert_eq!(shell_colour(0., centre, outer, edge), centre);
        assert_eq!(shell_colour(0.4, centre, outer, edge), centre);

        let middle = shell_colour(0.6, centre, outer, edge);
        assert!(middle.y > centre.y && middle.y < outer.y);

        // At the very edge, the colour is almost white
        let rim = shell_colour(1., centre, outer, edge);
        assert!(rim.y > 0.95 && rim.z > 0.95, "{rim}");
    }

    #[test]
    fn empty_tree_test() {
        let config = TreeConfig {
            particle_count: 0,
            ..TreeConfig::default()
        };
        let tree = generate_tree(&config, &mut StdRng::seed_from_u64(12345)).unwrap();

        assert!(tree.is_empty());
        assert!(tree.colours().is_empty());
    }

    #[test]
    fn degenerate_tree_test() {
        let mut rng = StdRng::seed_from_u64(12345);

        for height in [0., -3., f32::NAN, f32::INFINITY] {
            let config = TreeConfig {
                height,
                ..TreeConfig::default()
            };
            assert!(matches!(
                generate_tree(&config, &mut rng),
                Err(ParticleError::DegenerateHeight(_))
            ));
        }

        let config = TreeConfig {
            base_radius: 0.,
            ..TreeConfig::default()
        };
        assert_eq!(
            generate_tree(&config, &mut rng),
            Err(ParticleError::DegenerateRadius(0.))
        );
    }
}
