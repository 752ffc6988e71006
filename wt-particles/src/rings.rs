//! This module contains the rings of particles that float around the base of the tree.

use crate::{error::ensure_positive, ParticleError, ParticlePointSet};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::{debug, instrument};
use wt_frame::{lerp_colour, rgb_to_vec3, RGBArray, Transform};

/// The config for the base rings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingsConfig {
    /// The radius of each ring as a multiple of the base radius of the tree. There is one ring
    /// per entry.
    pub radius_multipliers: Vec<f32>,

    /// How many particles are in each ring.
    pub particles_per_ring: usize,

    /// The colour that the ring particles start from.
    pub white_colour: RGBArray,

    /// The colour that the ring particles are randomly blended towards.
    pub gold_colour: RGBArray,

    /// The maximum proportion of the way towards gold that a particle can be blended.
    pub max_gold_blend: f32,

    /// The total width of the random band each particle's radius is jittered within.
    pub radius_jitter: f32,

    /// How high above the ground the rings float.
    pub float_height: f32,

    /// The total width of the random band each particle's height is jittered within.
    pub height_jitter: f32,

    /// The spin speed of the innermost ring in radians per second. Ring `i` spins `i + 1` times
    /// as fast.
    pub spin_speed: f32,

    /// The amplitude of the vertical bobbing of each ring.
    pub bob_amplitude: f32,

    /// The angular frequency of the vertical bobbing of each ring.
    pub bob_frequency: f32,
}

impl Default for RingsConfig {
    fn default() -> Self {
        Self {
            radius_multipliers: vec![1.5, 1.85, 2.2],
            particles_per_ring: 1000,
            white_colour: [255, 255, 255],
            gold_colour: [255, 215, 0],
            max_gold_blend: 0.8,
            radius_jitter: 0.8,
            float_height: 0.4,
            height_jitter: 0.3,
            spin_speed: 0.036,
            bob_amplitude: 0.15,
            bob_frequency: 0.5,
        }
    }
}

/// A single spinning, bobbing ring of particles.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseRing {
    /// The particles in the ring, in its local space.
    points: ParticlePointSet,

    /// How fast the ring spins, in radians per second.
    spin_speed: f32,

    /// The current rotation of the ring around the vertical axis, in [0, 2pi).
    rotation: f32,

    /// The current vertical offset of the ring.
    bob_offset: f32,
}

impl BaseRing {
    /// The particles of this ring, in its local space.
    pub fn points(&self) -> &ParticlePointSet {
        &self.points
    }

    /// How fast this ring spins, in radians per second.
    pub fn spin_speed(&self) -> f32 {
        self.spin_speed
    }

    /// The current rotation of the ring around the vertical axis.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Where the ring is right now.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::new(0., self.bob_offset, 0.))
            .with_rotation(Vec3::new(0., self.rotation, 0.))
    }
}

/// All the rings around the base of the tree, innermost first.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseRings {
    /// The rings themselves.
    rings: Vec<BaseRing>,

    /// See [`RingsConfig::bob_amplitude`].
    bob_amplitude: f32,

    /// See [`RingsConfig::bob_frequency`].
    bob_frequency: f32,
}

impl BaseRings {
    /// Generate one ring per radius multiplier around a tree with the given base radius.
    ///
    /// The particles are spread evenly around each circle, with their radius and height randomly
    /// jittered, and a random blend between white and gold.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(
        config: &RingsConfig,
        base_radius: f32,
        rng: &mut R,
    ) -> Result<Self, ParticleError> {
        ensure_positive(base_radius, ParticleError::DegenerateRadius)?;
        for &multiplier in &config.radius_multipliers {
            ensure_positive(base_radius * multiplier, ParticleError::DegenerateRadius)?;
        }

        let white = rgb_to_vec3(config.white_colour);
        let gold = rgb_to_vec3(config.gold_colour);
        let count = config.particles_per_ring;

        let rings: Vec<BaseRing> = config
            .radius_multipliers
            .iter()
            .enumerate()
            .map(|(ring_idx, &multiplier)| {
                let radius = base_radius * multiplier;
                let mut positions = Vec::with_capacity(count);
                let mut colours = Vec::with_capacity(count);

                for i in 0..count {
                    let angle = i as f32 / count as f32 * TAU;
                    let jitter = (rng.gen::<f32>() - 0.5) * config.radius_jitter;
                    let y = config.float_height + (rng.gen::<f32>() - 0.5) * config.height_jitter;

                    positions.push(Vec3::new(
                        angle.cos() * (radius + jitter),
                        y,
                        angle.sin() * (radius + jitter),
                    ));
                    colours.push(lerp_colour(
                        white,
                        gold,
                        rng.gen::<f32>() * config.max_gold_blend,
                    ));
                }

                BaseRing {
                    points: ParticlePointSet::new(positions, colours),
                    spin_speed: (ring_idx + 1) as f32 * config.spin_speed,
                    rotation: 0.,
                    bob_offset: 0.,
                }
            })
            .collect();

        debug!(rings = rings.len(), count, "Generated base rings");
        Ok(Self {
            rings,
            bob_amplitude: config.bob_amplitude,
            bob_frequency: config.bob_frequency,
        })
    }

    /// Spin every ring by `dt` seconds and set its bob to where it should be at `time` seconds
    /// since the scene started.
    pub fn tick(&mut self, dt: f32, time: f32) {
        let dt = dt.max(0.);

        for (idx, ring) in self.rings.iter_mut().enumerate() {
            ring.rotation = (ring.rotation + ring.spin_speed * dt).rem_euclid(TAU);
            ring.bob_offset =
                (time * self.bob_frequency + idx as f32).sin() * self.bob_amplitude;
        }
    }

    /// The rings, innermost first.
    pub fn rings(&self) -> &[BaseRing] {
        &self.rings
    }

    /// Iterate over the point sets of all the rings, innermost first.
    pub fn point_sets(&self) -> impl Iterator<Item = &ParticlePointSet> + '_ {
        self.rings.iter().map(BaseRing::points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use glam::Vec2;
    use rand::{rngs::StdRng, SeedableRng};

    fn rings() -> BaseRings {
        BaseRings::generate(&RingsConfig::default(), 5., &mut StdRng::seed_from_u64(12345))
            .unwrap()
    }

    #[test]
    fn ring_geometry_test() {
        let rings = rings();
        assert_eq!(rings.rings().len(), 3);

        for (ring, multiplier) in rings.point_sets().zip([1.5, 1.85, 2.2]) {
            assert_eq!(ring.len(), 1000);

            let radius = 5. * multiplier;
            for (position, colour) in ring.iter() {
                let planar = Vec2::new(position.x, position.z).length();
                assert!((planar - radius).abs() <= 0.4 + 1e-4, "{planar} vs {radius}");
                assert!((0.25..=0.55).contains(&position.y), "{}", position.y);

                // Blending white towards gold only ever takes away blue and a bit of green
                assert!(approx_eq!(f32, colour.x, 1.));
                assert!(colour.z >= 0.2 - 1e-4);
            }
        }
    }

    #[test]
    fn outer_rings_spin_faster_test() {
        let mut rings = rings();
        let speeds: Vec<f32> = rings.rings().iter().map(BaseRing::spin_speed).collect();
        assert!(speeds.windows(2).all(|pair| pair[0] < pair[1]));

        rings.tick(2., 2.);
        for ring in rings.rings() {
            assert!(approx_eq!(f32, ring.rotation(), ring.spin_speed() * 2.));
            assert!(ring.transform().translation.y.abs() <= 0.15);
        }
    }

    #[test]
    fn no_rings_test() {
        let config = RingsConfig {
            radius_multipliers: vec![],
            ..RingsConfig::default()
        };
        let rings = BaseRings::generate(&config, 5., &mut StdRng::seed_from_u64(12345)).unwrap();
        assert!(rings.rings().is_empty());

        let config = RingsConfig {
            radius_multipliers: vec![1.5, -1.],
            ..RingsConfig::default()
        };
        assert_eq!(
            BaseRings::generate(&config, 5., &mut StdRng::seed_from_u64(12345)),
            Err(ParticleError::DegenerateRadius(-5.))
        );
    }
}
