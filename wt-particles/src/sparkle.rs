//! This module generates the little ball of sparkles at the head of every wish.

use crate::{error::ensure_positive, ParticleError, ParticlePointSet};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use tracing::{debug, instrument};
use wt_frame::{lerp_colour, rgb_to_vec3, RGBArray};

/// The config for the wish sparkle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SparkleConfig {
    /// How many points are in the sparkle.
    pub count: usize,

    /// The radius of the ball that the points are sampled in.
    pub radius: f32,

    /// The colour that every point starts from.
    pub core_colour: RGBArray,

    /// The colour that each point is randomly blended towards.
    pub highlight_colour: RGBArray,

    /// The colour that each point is then blended towards by the square of another random
    /// weight, so only a few points come out almost white.
    pub flash_colour: RGBArray,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            radius: 0.45,
            core_colour: [255, 0, 127],
            highlight_colour: [255, 204, 221],
            flash_colour: [255, 255, 255],
        }
    }
}

/// Generate the sparkle cloud. Every wish shares the same one and moves it with a transform.
///
/// The radius of each point is `radius * sqrt(U)`, which clusters the points slightly towards
/// the outside of the ball.
#[instrument(skip(rng))]
pub fn generate_sparkle<R: Rng + ?Sized>(
    config: &SparkleConfig,
    rng: &mut R,
) -> Result<ParticlePointSet, ParticleError> {
    ensure_positive(config.radius, ParticleError::DegenerateRadius)?;

    let core = rgb_to_vec3(config.core_colour);
    let highlight = rgb_to_vec3(config.highlight_colour);
    let flash = rgb_to_vec3(config.flash_colour);

    let mut positions = Vec::with_capacity(config.count);
    let mut colours = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let r = config.radius * rng.gen::<f32>().sqrt();
        let theta = rng.gen::<f32>() * TAU;
        let phi = rng.gen::<f32>() * PI;

        positions.push(Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        ));

        let colour = lerp_colour(core, highlight, rng.gen::<f32>());
        colours.push(lerp_colour(colour, flash, rng.gen::<f32>().powi(2)));
    }

    debug!(count = positions.len(), "Generated wish sparkle");
    Ok(ParticlePointSet::new(positions, colours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn sparkle_inside_ball_test() {
        let config = SparkleConfig::default();
        let sparkle = generate_sparkle(&config, &mut StdRng::seed_from_u64(12345)).unwrap();

        assert_eq!(sparkle.len(), 60);
        for (position, colour) in sparkle.iter() {
            assert!(position.length() <= config.radius + 1e-5, "{position}");

            // Every blend starts from a full red, so red never drops
            assert!(colour.x > 0.999, "{colour}");
            assert!(colour.cmpge(Vec3::ZERO).all() && colour.cmple(Vec3::ONE).all());
        }
    }

    #[test]
    fn degenerate_sparkle_test() {
        let config = SparkleConfig {
            radius: -0.1,
            ..SparkleConfig::default()
        };
        assert_eq!(
            generate_sparkle(&config, &mut StdRng::seed_from_u64(12345)),
            Err(ParticleError::DegenerateRadius(-0.1))
        );

        let config = SparkleConfig {
            count: 0,
            ..SparkleConfig::default()
        };
        assert!(generate_sparkle(&config, &mut StdRng::seed_from_u64(12345))
            .unwrap()
            .is_empty());
    }
}
