//! This module contains the snow that drifts down through the whole scene.

use crate::ParticleError;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The config for the snow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnowConfig {
    /// How many snowflakes there are.
    pub count: usize,

    /// The half-extents of the box that the snow lives in. The box is centred on the origin.
    pub bounds: Vec3,

    /// The slowest that a snowflake can fall, in units per second.
    pub min_fall_speed: f32,

    /// The fastest that a snowflake can fall, in units per second.
    pub max_fall_speed: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 4000,
            bounds: Vec3::new(50., 35., 50.),
            min_fall_speed: 1.2,
            max_fall_speed: 4.2,
        }
    }
}

impl SnowConfig {
    /// Check that this config describes a real box and a real range of speeds.
    pub fn validate(&self) -> Result<(), ParticleError> {
        if !(self.bounds.is_finite() && self.bounds.cmpgt(Vec3::ZERO).all()) {
            return Err(ParticleError::DegenerateBounds(self.bounds));
        }

        let speeds_are_valid = self.min_fall_speed.is_finite()
            && self.max_fall_speed.is_finite()
            && self.min_fall_speed >= 0.
            && self.min_fall_speed <= self.max_fall_speed;

        if speeds_are_valid {
            Ok(())
        } else {
            Err(ParticleError::InvalidSpeedRange {
                min: self.min_fall_speed,
                max: self.max_fall_speed,
            })
        }
    }
}

/// A field of snowflakes, each falling at its own speed.
///
/// When a snowflake falls out of the bottom of the box, it wraps back round to the top, so the
/// snow never runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct SnowField {
    /// The position of each snowflake.
    positions: Vec<Vec3>,

    /// How fast each snowflake falls, in units per second.
    fall_speeds: Vec<f32>,

    /// The half-extents of the box.
    bounds: Vec3,
}

impl SnowField {
    /// Scatter snowflakes uniformly through the box described by the config.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(config: &SnowConfig, rng: &mut R) -> Result<Self, ParticleError> {
        config.validate()?;

        let bounds = config.bounds;
        let mut positions = Vec::with_capacity(config.count);
        let mut fall_speeds = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            positions.push(Vec3::new(
                rng.gen_range(-bounds.x..bounds.x),
                rng.gen_range(-bounds.y..bounds.y),
                rng.gen_range(-bounds.z..bounds.z),
            ));
            fall_speeds.push(rng.gen_range(config.min_fall_speed..=config.max_fall_speed));
        }

        debug!(count = positions.len(), "Generated snow");
        Ok(Self {
            positions,
            fall_speeds,
            bounds,
        })
    }

    /// Let the snow fall for `dt` seconds.
    ///
    /// A negative `dt` does nothing.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.);

        for (position, &speed) in self.positions.iter_mut().zip(&self.fall_speeds) {
            position.y -= speed * dt;
            if position.y < -self.bounds.y {
                position.y = self.bounds.y;
            }
        }
    }

    /// The position of every snowflake.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// The fall speed of every snowflake, in the same order as [`Self::positions`].
    pub fn fall_speeds(&self) -> &[f32] {
        &self.fall_speeds
    }

    /// The half-extents of the box that the snow lives in.
    pub fn bounds(&self) -> Vec3 {
        self.bounds
    }

    /// The number of snowflakes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Is there no snow at all?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn small_field() -> SnowField {
        let config = SnowConfig {
            count: 200,
            ..SnowConfig::default()
        };
        SnowField::generate(&config, &mut StdRng::seed_from_u64(12345)).unwrap()
    }

    #[test]
    fn generated_inside_bounds_test() {
        let snow = small_field();
        let bounds = snow.bounds();

        assert_eq!(snow.len(), 200);
        for position in snow.positions() {
            assert!(position.abs().cmple(bounds).all(), "{position}");
        }
        for &speed in snow.fall_speeds() {
            assert!((1.2..=4.2).contains(&speed));
        }
    }

    #[test]
    fn snow_wraps_test() {
        let mut snow = small_field();
        let bounds = snow.bounds();
        let mut wrapped = vec![false; snow.len()];

        // Five minutes at 60 fps is long enough for even the slowest flake to fall through the
        // whole box several times
        for _ in 0..(60 * 300) {
            let before: Vec<f32> = snow.positions().iter().map(|p| p.y).collect();
            snow.tick(1. / 60.);

            for (idx, (&old_y, new)) in before.iter().zip(snow.positions()).enumerate() {
                assert!(
                    (-bounds.y..=bounds.y).contains(&new.y),
                    "Snowflake {idx} escaped to {}",
                    new.y
                );
                if new.y > old_y {
                    wrapped[idx] = true;
                }
            }
        }

        assert!(wrapped.into_iter().all(|w| w), "Every snowflake should have wrapped");
    }

    #[test]
    fn snow_ignores_negative_dt_test() {
        let mut snow = small_field();
        let before = snow.clone();

        snow.tick(-1.);
        assert_eq!(snow, before);

        snow.tick(f32::NAN);
        assert_eq!(snow, before);
    }

    #[test]
    fn empty_and_degenerate_snow_test() {
        let mut rng = StdRng::seed_from_u64(12345);

        let empty = SnowField::generate(
            &SnowConfig {
                count: 0,
                ..SnowConfig::default()
            },
            &mut rng,
        )
        .unwrap();
        assert!(empty.is_empty());

        let flat = SnowConfig {
            bounds: Vec3::new(50., 0., 50.),
            ..SnowConfig::default()
        };
        assert!(matches!(
            SnowField::generate(&flat, &mut rng),
            Err(ParticleError::DegenerateBounds(_))
        ));

        let backwards = SnowConfig {
            min_fall_speed: 3.,
            max_fall_speed: 1.,
            ..SnowConfig::default()
        };
        assert_eq!(
            SnowField::generate(&backwards, &mut rng),
            Err(ParticleError::InvalidSpeedRange { min: 3., max: 1. })
        );
    }
}
