//! This module contains the traits shared by all the animators.

use crate::Tick;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wt_frame::Transform;

/// The trait implemented by every animator, which defines how to advance it.
pub trait Animator {
    /// The type of this animator's config. One config is shared by every animator of a kind.
    type Config;

    /// The type of the events that this animator can report from a tick.
    type Event;

    /// Advance this animator by one tick, returning an event if something noteworthy happened
    /// during this tick.
    ///
    /// A tick with a `dt` of zero must not change the state of the animator, apart from
    /// anything which depends only on the absolute time.
    fn tick<R: Rng + ?Sized>(
        &mut self,
        config: &Self::Config,
        tick: Tick,
        rng: &mut R,
    ) -> Option<Self::Event>;

    /// Where the animated object is right now.
    fn transform(&self) -> Transform;
}

/// Something that reacts to the pointer hovering over it.
pub trait Hoverable {
    /// Set whether the pointer is over this object.
    fn set_hovered(&mut self, hovered: bool);

    /// Is the pointer over this object?
    fn is_hovered(&self) -> bool;
}

/// A material parameter that jumps between two levels when hovered.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverLevel {
    /// The value when not hovered.
    pub idle: f32,

    /// The value when hovered.
    pub hovered: f32,
}

impl HoverLevel {
    /// Create a new pair of levels.
    pub const fn new(idle: f32, hovered: f32) -> Self {
        Self { idle, hovered }
    }

    /// Pick the right level.
    #[inline]
    pub fn pick(self, hovered: bool) -> f32 {
        if hovered {
            self.hovered
        } else {
            self.idle
        }
    }
}
