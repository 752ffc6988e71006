//! This crate generates the point clouds that make up the static structure of the scene: the tree
//! itself, the snow, the rings around the base of the tree, and the sparkle at the head of every
//! wish.
//!
//! All of the generators are closed-form random sampling over in-memory arrays, so none of them
//! can fail except by being given a degenerate configuration. A count of zero is not degenerate;
//! it just gives an empty set.

mod error;
mod point_set;
mod rings;
mod snow;
mod sparkle;
mod tree;

pub use self::{
    error::ParticleError,
    point_set::ParticlePointSet,
    rings::{BaseRing, BaseRings, RingsConfig},
    snow::{SnowConfig, SnowField},
    sparkle::{generate_sparkle, SparkleConfig},
    tree::{generate_tree, shell_colour, TreeConfig},
};
