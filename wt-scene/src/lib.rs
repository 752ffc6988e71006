//! This crate owns the whole scene: the particle fields, every gift, ornament, and wish, and the
//! gesture tracking that moves it all around.
//!
//! The scene is advanced one frame at a time with [`Scene::advance`], and everything the renderer
//! needs for that frame comes out of [`Scene::frame`]. Anything that happens outside of the frame
//! loop, like the user typing a wish, goes in through a [`SceneHandle`] and gets applied at the
//! start of the next frame.

mod config;
mod decorations;
mod error;
mod events;
mod palette;
mod placement;
mod scene;

pub use self::{
    config::SceneConfig,
    decorations::{Gift, Ornament, Payload, WishProjectile},
    error::{PlacementError, SceneError},
    events::{SceneEvent, SceneHandle},
    palette::Palette,
    placement::{
        place_in_outer_ring, place_on_tree_surface, Placement, PlacementConfig, PlacementMode,
        RingPolicy,
    },
    scene::{ClickCallback, Scene},
};
