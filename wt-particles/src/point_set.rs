//! This module provides [`ParticlePointSet`].

use glam::Vec3;

/// A fixed set of particles with a position and a colour each.
///
/// The set is immutable once created. Anything that moves a whole set around does so with a
/// transform rather than by touching the points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticlePointSet {
    /// The position of every particle.
    positions: Vec<Vec3>,

    /// The colour of every particle, as RGB in [0, 1].
    colours: Vec<Vec3>,
}

impl ParticlePointSet {
    /// Create a new point set. There must be exactly one colour per position.
    pub(crate) fn new(positions: Vec<Vec3>, colours: Vec<Vec3>) -> Self {
        debug_assert_eq!(
            positions.len(),
            colours.len(),
            "Every particle needs exactly one colour"
        );
        Self { positions, colours }
    }

    /// The positions of the particles.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// The colours of the particles, in the same order as [`Self::positions`].
    pub fn colours(&self) -> &[Vec3] {
        &self.colours
    }

    /// The number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(position, colour)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.colours.iter().copied())
    }
}
