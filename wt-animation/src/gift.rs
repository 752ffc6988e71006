//! This module contains the [`FallAndSettle`] animator used for gifts.

use crate::{approach, Animator, HoverLevel, Hoverable, Tick};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::trace;
use wt_frame::{Material, RGBArray, Transform};

/// The config for the [`FallAndSettle`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallConfig {
    /// How far above its resting height a gift starts falling from.
    pub drop_height: f32,

    /// The downwards acceleration, in units per second squared.
    pub gravity: f32,

    /// A gift that hits the ground faster than this bounces. Slower than this, it lands.
    pub bounce_threshold: f32,

    /// The proportion of its speed that a gift keeps after a bounce.
    pub bounce_damping: f32,

    /// The most bounces a gift is allowed before it's forced to land, however fast it's going.
    pub max_bounces: u32,

    /// How fast a gift spins while falling, in radians per second.
    pub fall_spin_speed: f32,

    /// The amplitude of the landed bob.
    pub bob_amplitude: f32,

    /// The angular frequency of the landed bob.
    pub bob_frequency: f32,

    /// The amplitude of the landed sway about the vertical axis, in radians.
    pub sway_amplitude: f32,

    /// The angular frequency of the landed sway.
    pub sway_frequency: f32,

    /// The smallest random base scale of a gift.
    pub min_scale: f32,

    /// The largest random base scale of a gift.
    pub max_scale: f32,

    /// The base scale is multiplied by this while hovered.
    pub hover_scale: f32,

    /// The per-frame smoothing factor of the scale.
    pub scale_smoothing: f32,

    /// The emissive intensity of the box.
    pub emissive: HoverLevel,

    /// The intensity of the light inside the box.
    pub light: HoverLevel,

    /// The opacity of the glowing rim around the box.
    pub rim_opacity: HoverLevel,
}

impl Default for FallConfig {
    fn default() -> Self {
        Self {
            drop_height: 24.5,
            gravity: 15.,
            bounce_threshold: 2.,
            bounce_damping: 0.3,
            max_bounces: 8,
            fall_spin_speed: 2.,
            bob_amplitude: 0.05,
            bob_frequency: 1.5,
            sway_amplitude: 0.1,
            sway_frequency: 0.5,
            min_scale: 0.6,
            max_scale: 1.,
            hover_scale: 1.25,
            scale_smoothing: 0.15,
            emissive: HoverLevel::new(0.4, 0.8),
            light: HoverLevel::new(4., 8.),
            rim_opacity: HoverLevel::new(0.2, 0.4),
        }
    }
}

/// The phase of a falling gift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FallPhase {
    /// The gift is still moving vertically.
    Falling {
        /// The vertical velocity, positive upwards.
        velocity: f32,

        /// How many times the gift has bounced so far.
        bounces: u32,
    },

    /// The gift has come to rest and only bobs and sways from now on. This phase never ends.
    Landed,
}

/// Something that happened to a gift during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallEvent {
    /// The gift hit the ground and bounced back up. This is the number of bounces so far.
    Bounced(u32),

    /// The gift hit the ground and stayed there.
    Landed,
}

/// Drop a gift from above its resting position, bounce it a few times, then let it bob gently.
#[derive(Clone, Debug, PartialEq)]
pub struct FallAndSettle {
    /// Where the gift comes to rest.
    rest_position: Vec3,

    /// The colour of the gift.
    colour: RGBArray,

    /// The current phase.
    phase: FallPhase,

    /// The current height of the gift.
    height: f32,

    /// The current rotation about the vertical axis.
    spin: f32,

    /// A random phase in [0, 2pi) so that gifts don't bob in unison.
    phase_offset: f32,

    /// The random size of this gift when not hovered.
    base_scale: f32,

    /// The current smoothed scale.
    scale: f32,

    /// Is the pointer over this gift?
    hovered: bool,
}

impl FallAndSettle {
    /// Create a new gift that will fall to and settle at `rest_position`.
    pub fn new<R: Rng + ?Sized>(
        rest_position: Vec3,
        colour: RGBArray,
        config: &FallConfig,
        rng: &mut R,
    ) -> Self {
        let phase_offset = rng.gen::<f32>() * TAU;
        let base_scale =
            config.min_scale + rng.gen::<f32>() * (config.max_scale - config.min_scale);

        Self {
            rest_position,
            colour,
            phase: FallPhase::Falling {
                velocity: 0.,
                bounces: 0,
            },
            height: rest_position.y + config.drop_height,
            spin: phase_offset,
            phase_offset,
            base_scale,
            scale: base_scale,
            hovered: false,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> FallPhase {
        self.phase
    }

    /// Has this gift come to rest?
    pub fn has_landed(&self) -> bool {
        self.phase == FallPhase::Landed
    }

    /// Where this gift comes to rest.
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    /// The current height of the gift.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The random size of this gift when not hovered.
    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    /// The material parameters of this gift right now.
    pub fn material(&self, config: &FallConfig) -> Material {
        Material {
            colour: self.colour,
            emissive_intensity: config.emissive.pick(self.hovered),
            light_intensity: config.light.pick(self.hovered),
            opacity: 1.,
            glow_opacity: config.rim_opacity.pick(self.hovered),
        }
    }
}

impl Animator for FallAndSettle {
    type Config = FallConfig;
    type Event = FallEvent;

    fn tick<R: Rng + ?Sized>(
        &mut self,
        config: &FallConfig,
        tick: Tick,
        _rng: &mut R,
    ) -> Option<FallEvent> {
        let dt = tick.dt();
        let rest_y = self.rest_position.y;
        let mut event = None;

        match self.phase {
            FallPhase::Falling {
                mut velocity,
                mut bounces,
            } => {
                velocity -= config.gravity * dt;
                self.height += velocity * dt;
                self.spin = (self.spin + config.fall_spin_speed * dt).rem_euclid(TAU);

                // Only moving downwards counts as hitting the ground, since a gift that has just
                // bounced is still sitting at its resting height
                if self.height <= rest_y && velocity <= 0. {
                    self.height = rest_y;

                    if velocity.abs() > config.bounce_threshold && bounces < config.max_bounces {
                        velocity *= -config.bounce_damping;
                        bounces += 1;
                        trace!(bounces, velocity, "Gift bounced");
                        event = Some(FallEvent::Bounced(bounces));
                    } else {
                        trace!(bounces, "Gift landed");
                        self.phase = FallPhase::Landed;
                        event = Some(FallEvent::Landed);
                    }
                }

                if let FallPhase::Falling { .. } = self.phase {
                    self.phase = FallPhase::Falling { velocity, bounces };
                }
            }
            FallPhase::Landed => {
                let t = tick.time();
                self.height = rest_y
                    + (t * config.bob_frequency + self.phase_offset).sin() * config.bob_amplitude;
                self.spin = self.phase_offset
                    + (t * config.sway_frequency).sin() * config.sway_amplitude;
            }
        }

        let hover_factor = if self.hovered { config.hover_scale } else { 1. };
        self.scale = approach(
            self.scale,
            self.base_scale * hover_factor,
            config.scale_smoothing,
            dt,
        );

        event
    }

    fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::new(
            self.rest_position.x,
            self.height,
            self.rest_position.z,
        ))
        .with_rotation(Vec3::new(0., self.spin, 0.))
        .with_scale(self.scale)
    }
}

impl Hoverable for FallAndSettle {
    fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    const DT: f32 = 1. / 60.;

    /// Tick the gift at 60 fps until it lands, returning the events and the time it landed at.
    fn drop_gift(
        gift: &mut FallAndSettle,
        config: &FallConfig,
        rng: &mut StdRng,
    ) -> (Vec<FallEvent>, f32) {
        let mut events = vec![];
        let mut time = 0.;

        for _ in 0..(60 * 60) {
            time += DT;
            if let Some(event) = gift.tick(config, Tick::new(DT, time), rng) {
                events.push(event);
                if event == FallEvent::Landed {
                    return (events, time);
                }
            }
        }

        panic!("The gift never landed: {gift:?}");
    }

    #[test]
    fn gift_falls_bounces_and_lands_test() {
        let config = FallConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let rest = Vec3::new(8., 0., 2.);
        let mut gift = FallAndSettle::new(rest, [255, 0, 85], &config, &mut rng);

        assert!(approx_eq!(f32, gift.height(), 24.5));
        assert!((0.6..=1.).contains(&gift.base_scale()));

        let mut previous_height = gift.height();
        gift.tick(&config, Tick::new(DT, DT), &mut rng);
        assert!(gift.height() < previous_height);
        previous_height = gift.height();
        assert!(previous_height > rest.y);

        let (events, _) = drop_gift(&mut gift, &config, &mut rng);

        // From this height with this damping, the gift bounces three times and then lands
        assert_eq!(
            events,
            vec![
                FallEvent::Bounced(1),
                FallEvent::Bounced(2),
                FallEvent::Bounced(3),
                FallEvent::Landed
            ]
        );
        assert!(gift.has_landed());
        assert_eq!(gift.height(), rest.y);

        let transform = gift.transform();
        assert_eq!(transform.translation.x, rest.x);
        assert_eq!(transform.translation.z, rest.z);
    }

    #[test]
    fn landed_gift_never_falls_again_test() {
        let config = FallConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let rest = Vec3::new(-7., 0.5, 3.);
        let mut gift = FallAndSettle::new(rest, [0, 255, 204], &config, &mut rng);

        let (_, mut time) = drop_gift(&mut gift, &config, &mut rng);

        for dt in [DT, 0., 0.5, 3., DT, 10.] {
            time += dt;
            assert_eq!(gift.tick(&config, Tick::new(dt, time), &mut rng), None);
            assert!(gift.has_landed());
            assert!(
                (gift.height() - rest.y).abs() <= config.bob_amplitude + 1e-6,
                "{} strayed too far from {}",
                gift.height(),
                rest.y
            );
        }
    }

    #[test]
    fn perfectly_elastic_gift_still_lands_test() {
        let config = FallConfig {
            bounce_damping: 1.,
            ..FallConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(12345);
        let mut gift = FallAndSettle::new(Vec3::new(6., 0., 0.), [255, 204, 0], &config, &mut rng);

        let (events, _) = drop_gift(&mut gift, &config, &mut rng);

        assert_eq!(events.len(), config.max_bounces as usize + 1);
        assert_eq!(events.last(), Some(&FallEvent::Landed));
    }

    #[test]
    fn hover_scale_is_smoothed_test() {
        let config = FallConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut gift = FallAndSettle::new(Vec3::new(6., 0., 0.), [255, 255, 255], &config, &mut rng);
        let base = gift.base_scale();

        assert_eq!(gift.material(&config).emissive_intensity, 0.4);

        gift.set_hovered(true);
        assert!(gift.is_hovered());
        assert_eq!(gift.material(&config).emissive_intensity, 0.8);
        assert_eq!(gift.material(&config).light_intensity, 8.);

        gift.tick(&config, Tick::new(DT, DT), &mut rng);
        let scale = gift.transform().scale;

        // One frame gets 15% of the way there
        assert!(approx_eq!(f32, scale, base + (base * 1.25 - base) * 0.15, epsilon = 1e-5));

        for i in 0..600 {
            gift.tick(&config, Tick::new(DT, i as f32 * DT), &mut rng);
        }
        assert!(approx_eq!(f32, gift.transform().scale, base * 1.25, epsilon = 1e-4));

        gift.set_hovered(false);
        gift.tick(&config, Tick::new(0., 20.), &mut rng);
        assert!(approx_eq!(f32, gift.transform().scale, base * 1.25, epsilon = 1e-4));
    }
}
