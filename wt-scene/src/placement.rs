//! This module decides where new decorations go.
//!
//! Ornaments hang just outside the surface of the tree, and gifts sit on the ground in a ring
//! around it. Neither can ever end up inside the tree.

use crate::PlacementError;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use wt_particles::TreeConfig;

/// How gifts are spread around the ring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingPolicy {
    /// The angle between consecutive gifts, in radians.
    pub angle_step: f32,

    /// The maximum random extra angle added to each gift, in radians.
    pub angle_jitter: f32,

    /// The smallest distance from the centre, as a multiple of the base radius of the tree.
    pub min_multiplier: f32,

    /// The largest distance from the centre, as a multiple of the base radius of the tree.
    pub max_multiplier: f32,
}

/// The config for placing decorations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// The lowest that an ornament can hang.
    pub ornament_min_height: f32,

    /// The range of heights that ornaments can hang across, as a proportion of the height of the
    /// tree, starting from [`Self::ornament_min_height`].
    pub ornament_height_fraction: f32,

    /// How far outside the surface of the tree an ornament hangs.
    pub surface_margin: f32,

    /// The height that gifts rest at.
    pub gift_height: f32,

    /// The policy for the gifts that are there when the scene starts.
    pub seeded: RingPolicy,

    /// The policy for gifts added by the user.
    pub incremental: RingPolicy,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            ornament_min_height: 1.5,
            ornament_height_fraction: 0.7,
            surface_margin: 0.15,
            gift_height: 0.5,
            seeded: RingPolicy {
                angle_step: 1.25,
                angle_jitter: 0.,
                min_multiplier: 1.4,
                max_multiplier: 2.,
            },
            incremental: RingPolicy {
                angle_step: 1.6,
                angle_jitter: 0.4,
                min_multiplier: 1.3,
                max_multiplier: 2.3,
            },
        }
    }
}

impl PlacementConfig {
    /// Check that no placement can ever land inside the tree, and that gifts added later always
    /// sit at a larger angle.
    pub fn validate(&self) -> Result<(), PlacementError> {
        for (ring, policy) in [("seeded", &self.seeded), ("incremental", &self.incremental)] {
            if !(policy.min_multiplier > 1. && policy.min_multiplier <= policy.max_multiplier) {
                return Err(PlacementError::RingInsideTree {
                    ring,
                    min: policy.min_multiplier,
                    max: policy.max_multiplier,
                });
            }

            if !(policy.angle_jitter >= 0. && policy.angle_jitter < policy.angle_step) {
                return Err(PlacementError::JitterOverlapsStep {
                    ring,
                    jitter: policy.angle_jitter,
                    step: policy.angle_step,
                });
            }
        }

        if !(self.surface_margin >= 0.) {
            return Err(PlacementError::NegativeSurfaceMargin(self.surface_margin));
        }

        Ok(())
    }

    /// Get the ring policy for the given mode.
    pub fn policy(&self, mode: PlacementMode) -> &RingPolicy {
        match mode {
            PlacementMode::Seeded => &self.seeded,
            PlacementMode::Incremental => &self.incremental,
        }
    }
}

/// Which ring policy to use for a gift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum PlacementMode {
    /// The gifts that are there when the scene starts.
    Seeded,

    /// Gifts added by the user.
    Incremental,
}

/// Where a decoration goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// The resting position of the decoration, relative to the base of the tree.
    pub position: Vec3,

    /// The angle around the vertical axis that the decoration was placed at, in radians. This is
    /// not wrapped into [0, 2pi), so gifts placed later always have a larger angle.
    pub azimuth: f32,
}

impl Placement {
    /// Create a placement at the given height, distance from the centre, and angle.
    fn from_polar(height: f32, distance: f32, azimuth: f32) -> Self {
        Self {
            position: Vec3::new(azimuth.cos() * distance, height, azimuth.sin() * distance),
            azimuth,
        }
    }

    /// The distance from the vertical axis.
    pub fn planar_distance(&self) -> f32 {
        self.position.x.hypot(self.position.z)
    }
}

/// Pick a random spot just outside the surface of the tree for an ornament.
pub fn place_on_tree_surface<R: Rng + ?Sized>(
    tree: &TreeConfig,
    config: &PlacementConfig,
    rng: &mut R,
) -> Placement {
    let height =
        rng.gen::<f32>() * tree.height * config.ornament_height_fraction + config.ornament_min_height;
    let radius_at_h = tree.radius_at_height(height);
    let azimuth = rng.gen::<f32>() * TAU;

    Placement::from_polar(height, radius_at_h + config.surface_margin, azimuth)
}

/// Place the gift with the given index in the ring around the base of the tree.
pub fn place_in_outer_ring<R: Rng + ?Sized>(
    index: usize,
    base_radius: f32,
    mode: PlacementMode,
    config: &PlacementConfig,
    rng: &mut R,
) -> Placement {
    let policy = config.policy(mode);

    let azimuth = index as f32 * policy.angle_step + rng.gen::<f32>() * policy.angle_jitter;
    let distance = base_radius
        * (policy.min_multiplier
            + rng.gen::<f32>() * (policy.max_multiplier - policy.min_multiplier));

    Placement::from_polar(config.gift_height, distance, azimuth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn ornaments_sit_outside_tree_test() {
        let tree = TreeConfig::default();
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..1000 {
            let placement = place_on_tree_surface(&tree, &config, &mut rng);
            let height = placement.position.y;

            assert!((1.5..=0.7 * 15. + 1.5).contains(&height), "{height}");
            assert!(placement.planar_distance() >= tree.radius_at_height(height));
            assert!(
                (placement.planar_distance() - tree.radius_at_height(height) - 0.15).abs() < 1e-4
            );
        }
    }

    #[test]
    fn gifts_sit_in_ring_test() {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);

        for (mode, min, max) in [
            (PlacementMode::Seeded, 1.4, 2.),
            (PlacementMode::Incremental, 1.3, 2.3),
        ] {
            let mut previous_azimuth = f32::NEG_INFINITY;

            for index in 0..100 {
                let placement = place_in_outer_ring(index, 5., mode, &config, &mut rng);
                let distance = placement.planar_distance();

                assert!(
                    distance >= 5. * min - 1e-4 && distance <= 5. * max + 1e-4,
                    "{mode} gift {index} is {distance} from the centre"
                );
                assert!(distance >= 5. * 1.3 - 1e-4);
                assert_eq!(placement.position.y, 0.5);
                assert!(placement.azimuth > previous_azimuth);
                previous_azimuth = placement.azimuth;
            }
        }
    }

    #[test]
    fn seeded_gifts_are_evenly_spaced_test() {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);

        for index in 0..5 {
            let placement = place_in_outer_ring(index, 5., PlacementMode::Seeded, &config, &mut rng);
            assert_eq!(placement.azimuth, index as f32 * 1.25);
        }
    }

    #[test]
    fn validate_placement_test() {
        assert_eq!(PlacementConfig::default().validate(), Ok(()));

        let mut config = PlacementConfig::default();
        config.incremental.min_multiplier = 0.9;
        assert!(config.validate().is_err());

        let mut config = PlacementConfig::default();
        config.seeded.max_multiplier = 1.2;
        assert!(config.validate().is_err());

        let mut config = PlacementConfig::default();
        config.incremental.angle_jitter = 1.6;
        assert_eq!(
            config.validate(),
            Err(PlacementError::JitterOverlapsStep {
                ring: "incremental",
                jitter: 1.6,
                step: 1.6,
            })
        );

        let mut config = PlacementConfig::default();
        config.surface_margin = -0.1;
        assert_eq!(
            config.validate(),
            Err(PlacementError::NegativeSurfaceMargin(-0.1))
        );
    }
}
