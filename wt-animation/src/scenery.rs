//! This module contains the small bits of animation that belong to the scene itself rather than
//! to any one decoration.

use glam::Vec3;
use std::f32::consts::TAU;
use wt_frame::Transform;

/// The heart on top of the tree, which spins slowly about the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopperSpin {
    /// Where the topper sits.
    position: Vec3,

    /// How fast it spins, in radians per second.
    speed: f32,

    /// The current rotation, in [0, 2pi).
    rotation: f32,
}

impl TopperSpin {
    /// Create a new topper at the given position.
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            speed,
            rotation: 0.,
        }
    }

    /// Spin the topper for `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.rotation = (self.rotation + self.speed * dt.max(0.)).rem_euclid(TAU);
    }

    /// Where the topper is right now.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Vec3::new(0., self.rotation, 0.))
    }
}

/// The glow that washes over the tree when a wish lands on it, then fades away linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreePulse {
    /// The current intensity, in [0, 1].
    intensity: f32,

    /// How much intensity is lost per second.
    decay_rate: f32,
}

impl TreePulse {
    /// Create a new pulse that starts off dark.
    pub fn new(decay_rate: f32) -> Self {
        Self {
            intensity: 0.,
            decay_rate,
        }
    }

    /// Light the tree up to the given intensity, which is clamped to [0, 1].
    pub fn trigger(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0., 1.);
    }

    /// Let the pulse fade for `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.intensity = (self.intensity - self.decay_rate * dt.max(0.)).max(0.);
    }

    /// The current intensity, in [0, 1].
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn topper_spin_test() {
        let mut topper = TopperSpin::new(Vec3::new(0., 15.5, 0.), 1.5);
        topper.tick(1.);
        assert!(approx_eq!(f32, topper.transform().rotation.y, 1.5));

        topper.tick(-5.);
        assert!(approx_eq!(f32, topper.transform().rotation.y, 1.5));

        topper.tick(10.);
        let rotation = topper.transform().rotation.y;
        assert!((0.0..TAU).contains(&rotation));
        assert_eq!(topper.transform().translation, Vec3::new(0., 15.5, 0.));
    }

    #[test]
    fn tree_pulse_test() {
        let mut pulse = TreePulse::new(0.7);
        assert_eq!(pulse.intensity(), 0.);

        pulse.trigger(0.8);
        pulse.tick(0.5);
        assert!(approx_eq!(f32, pulse.intensity(), 0.45, epsilon = 1e-6));

        pulse.tick(10.);
        assert_eq!(pulse.intensity(), 0.);

        pulse.trigger(3.);
        assert_eq!(pulse.intensity(), 1.);
    }
}
