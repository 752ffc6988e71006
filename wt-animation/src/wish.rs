//! This module contains the [`FlightWithTrail`] animator used for wishes, and the
//! [`TrailBuffer`] that it leaves behind it.

use crate::{ease_in_out_cubic, Animator, QuadraticBezier, Tick};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::trace;
use wt_frame::Transform;

/// The config for the [`FlightWithTrail`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Where every wish is launched from.
    pub launch_point: Vec3,

    /// The control point that pulls the flight path out to the side and up.
    pub control_point: Vec3,

    /// How much of the flight is covered per second, before easing.
    pub progress_rate: f32,

    /// The number of past positions kept in the trail.
    pub trail_capacity: usize,

    /// The maximum random offset on each axis of each new trail point.
    pub trail_jitter: f32,

    /// How fast the sparkle spins about each axis, in radians per second.
    pub spin_speed: Vec3,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            launch_point: Vec3::new(0., -6., 12.),
            control_point: Vec3::new(12., 10., 8.),
            progress_rate: 0.5,
            trail_capacity: 120,
            trail_jitter: 0.075,
            spin_speed: Vec3::new(0., 6., 3.),
        }
    }
}

/// A fixed-capacity history of positions, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBuffer {
    /// The points, newest first.
    points: Vec<Vec3>,

    /// The maximum number of points.
    capacity: usize,
}

impl TrailBuffer {
    /// Create a new empty trail.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a point to the head of the trail, shifting every other point back by one and dropping
    /// the oldest if the trail is full.
    pub fn push(&mut self, point: Vec3) {
        if self.capacity == 0 {
            return;
        }

        if self.points.len() == self.capacity {
            self.points.pop();
        }
        self.points.insert(0, point);
    }

    /// The points in the trail, newest first.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// The number of points in the trail.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the trail empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The maximum number of points in the trail.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The phase of a wish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlightPhase {
    /// The wish is in the air.
    Flying {
        /// The linear progress along the flight, in [0, 1).
        progress: f32,
    },

    /// The wish has reached the top of the tree. Once a wish is in this phase, it never leaves,
    /// which is what stops it arriving twice.
    Arrived,
}

/// Something that happened to a wish during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightEvent {
    /// The wish reached the top of the tree. This is only ever reported once per wish.
    Arrived,
}

/// Fly a wish along a curve from the launch point to the top of the tree, leaving a sparkling
/// trail behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightWithTrail {
    /// The path of the flight.
    curve: QuadraticBezier,

    /// The current phase.
    phase: FlightPhase,

    /// The current position of the head of the wish.
    position: Vec3,

    /// The current rotation of the sparkle.
    rotation: Vec3,

    /// The trail behind the wish.
    trail: TrailBuffer,
}

impl FlightWithTrail {
    /// Create a new wish at the launch point which will fly to `apex`.
    pub fn new(config: &FlightConfig, apex: Vec3) -> Self {
        Self {
            curve: QuadraticBezier {
                start: config.launch_point,
                control: config.control_point,
                end: apex,
            },
            phase: FlightPhase::Flying { progress: 0. },
            position: config.launch_point,
            rotation: Vec3::ZERO,
            trail: TrailBuffer::new(config.trail_capacity),
        }
    }

    /// The current phase.
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Has this wish arrived?
    pub fn has_arrived(&self) -> bool {
        self.phase == FlightPhase::Arrived
    }

    /// The linear progress along the flight, in [0, 1].
    pub fn progress(&self) -> f32 {
        match self.phase {
            FlightPhase::Flying { progress } => progress,
            FlightPhase::Arrived => 1.,
        }
    }

    /// The path of this wish.
    pub fn curve(&self) -> &QuadraticBezier {
        &self.curve
    }

    /// The current position of the head of the wish.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The trail behind the wish.
    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }
}

impl Animator for FlightWithTrail {
    type Config = FlightConfig;
    type Event = FlightEvent;

    fn tick<R: Rng + ?Sized>(
        &mut self,
        config: &FlightConfig,
        tick: Tick,
        rng: &mut R,
    ) -> Option<FlightEvent> {
        let FlightPhase::Flying { progress } = self.phase else {
            return None;
        };

        let dt = tick.dt();
        if dt == 0. {
            return None;
        }

        let progress = progress + config.progress_rate * dt;
        if progress >= 1. {
            trace!("Wish arrived");
            self.phase = FlightPhase::Arrived;
            self.position = self.curve.end;
            return Some(FlightEvent::Arrived);
        }
        self.phase = FlightPhase::Flying { progress };

        self.position = self.curve.point_at(ease_in_out_cubic(progress));
        self.rotation = (self.rotation + config.spin_speed * dt)
            .to_array()
            .map(|angle| angle.rem_euclid(TAU))
            .into();

        let jitter = (rng.gen::<Vec3>() - Vec3::splat(0.5)) * (2. * config.trail_jitter);
        self.trail.push(self.position + jitter);

        None
    }

    fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}
