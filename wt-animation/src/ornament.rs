//! This module contains the [`MaterializeAndIdle`] animator used for ornaments.

use crate::{approach, Animator, HoverLevel, Hoverable, Tick};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wt_frame::{Material, RGBArray, Transform};

/// The config for the [`MaterializeAndIdle`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterializeConfig {
    /// How much of the materialization happens per second.
    pub rate: f32,

    /// The amplitude of the idle bob.
    pub bob_amplitude: f32,

    /// The angular frequency of the idle bob.
    pub bob_frequency: f32,

    /// The amplitude of the sway about the vertical axis, in radians.
    pub yaw_amplitude: f32,

    /// The angular frequency of the sway about the vertical axis.
    pub yaw_frequency: f32,

    /// The amplitude of the sway about the forward axis, in radians.
    pub roll_amplitude: f32,

    /// The angular frequency of the sway about the forward axis.
    pub roll_frequency: f32,

    /// The scale is multiplied by this while hovered.
    pub hover_scale: f32,

    /// The per-frame smoothing factor of the scale.
    pub scale_smoothing: f32,

    /// The emissive intensity of the star.
    pub emissive: HoverLevel,

    /// The intensity of the point light on the ornament.
    pub light: HoverLevel,

    /// The opacity of the glowing core of the ornament.
    pub core_opacity: HoverLevel,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self {
            rate: 1.5,
            bob_amplitude: 0.03,
            bob_frequency: 2.,
            yaw_amplitude: 0.2,
            yaw_frequency: 0.5,
            roll_amplitude: 0.1,
            roll_frequency: 0.8,
            hover_scale: 1.3,
            scale_smoothing: 0.1,
            emissive: HoverLevel::new(0.6, 2.5),
            light: HoverLevel::new(0.5, 4.),
            core_opacity: HoverLevel::new(0.4, 0.8),
        }
    }
}

/// The phase of an ornament.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrnamentPhase {
    /// The ornament is fading and growing in.
    Materializing {
        /// How far through materializing the ornament is, in [0, 1).
        progress: f32,
    },

    /// The ornament is fully visible and idles forever.
    Idle,
}

/// Something that happened to an ornament during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrnamentEvent {
    /// The ornament just became fully visible.
    Materialized,
}

/// Fade and grow an ornament in from nothing, then let it bob and sway where it hangs.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterializeAndIdle {
    /// Where the ornament hangs.
    rest_position: Vec3,

    /// The colour of the ornament.
    colour: RGBArray,

    /// The current phase.
    phase: OrnamentPhase,

    /// The current vertical offset from the resting position.
    bob: f32,

    /// The current rotation as Euler angles.
    rotation: Vec3,

    /// The current smoothed scale.
    scale: f32,

    /// Is the pointer over this ornament?
    hovered: bool,
}

impl MaterializeAndIdle {
    /// Create a new invisible ornament at `rest_position`.
    pub fn new(rest_position: Vec3, colour: RGBArray) -> Self {
        Self {
            rest_position,
            colour,
            phase: OrnamentPhase::Materializing { progress: 0. },
            bob: 0.,
            rotation: Vec3::ZERO,
            scale: 0.,
            hovered: false,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> OrnamentPhase {
        self.phase
    }

    /// How far through materializing this ornament is, in [0, 1].
    pub fn progress(&self) -> f32 {
        match self.phase {
            OrnamentPhase::Materializing { progress } => progress,
            OrnamentPhase::Idle => 1.,
        }
    }

    /// Where the ornament hangs.
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    /// The material parameters of this ornament right now.
    pub fn material(&self, config: &MaterializeConfig) -> Material {
        Material {
            colour: self.colour,
            emissive_intensity: config.emissive.pick(self.hovered),
            light_intensity: config.light.pick(self.hovered),
            opacity: self.progress(),
            glow_opacity: config.core_opacity.pick(self.hovered),
        }
    }
}

impl Animator for MaterializeAndIdle {
    type Config = MaterializeConfig;
    type Event = OrnamentEvent;

    fn tick<R: Rng + ?Sized>(
        &mut self,
        config: &MaterializeConfig,
        tick: Tick,
        _rng: &mut R,
    ) -> Option<OrnamentEvent> {
        let mut event = None;

        if let OrnamentPhase::Materializing { progress } = self.phase {
            let progress = (progress + config.rate * tick.dt()).min(1.);

            self.phase = if progress >= 1. {
                event = Some(OrnamentEvent::Materialized);
                OrnamentPhase::Idle
            } else {
                OrnamentPhase::Materializing { progress }
            };
        }

        // The idle motion is seeded by the position so that neighbouring ornaments don't move in
        // lockstep, and it grows in along with the ornament itself
        let t = tick.time();
        let weight = self.progress();
        let Vec3 { x, z, .. } = self.rest_position;

        self.bob = (t * config.bob_frequency + x).sin() * config.bob_amplitude * weight;
        self.rotation = Vec3::new(
            0.,
            (t * config.yaw_frequency + x).sin() * config.yaw_amplitude * weight,
            (t * config.roll_frequency + z).cos() * config.roll_amplitude * weight,
        );

        let hover_factor = if self.hovered { config.hover_scale } else { 1. };
        self.scale = approach(
            self.scale,
            self.progress() * hover_factor,
            config.scale_smoothing,
            tick.dt(),
        );

        event
    }

    fn transform(&self) -> Transform {
        Transform::from_translation(self.rest_position + Vec3::new(0., self.bob, 0.))
            .with_rotation(self.rotation)
            .with_scale(self.scale)
    }
}

impl Hoverable for MaterializeAndIdle {
    fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    fn is_hovered(&self) -> bool {
        self.hovered
    }
}
