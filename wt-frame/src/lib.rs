//! This crate provides the types that describe a single rendered frame of the scene.
//!
//! Nothing in here does any rendering. The scene produces a [`SceneFrame`] every tick and hands
//! it to whatever implements the renderer trait, which only ever reads it.

mod colour;
mod frame;
mod id;
mod transform;

pub use self::{
    colour::{lerp_colour, rgb_to_vec3, vec3_to_rgb, RGBArray},
    frame::{DecorationView, Material, PointCloudKind, PointCloudView, SceneFrame, WishView},
    id::{DecorationId, DecorationKind, ParseDecorationIdError},
    transform::Transform,
};
