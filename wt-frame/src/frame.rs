//! This module handles [`SceneFrame`] and the views it is made of.

use crate::{DecorationId, DecorationKind, RGBArray, Transform};
use glam::Vec3;
use serde::Serialize;

/// Which particle layer a point cloud belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, strum::EnumIter, strum::Display)]
pub enum PointCloudKind {
    /// The cone of particles making up the tree itself.
    Tree,

    /// The snow drifting down through the whole scene.
    Snow,

    /// One of the rings of particles floating around the base of the tree.
    BaseRing,

    /// The ball of sparkles at the head of a wish.
    WishSparkle,
}

/// A read-only view of a point cloud for the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointCloudView<'a> {
    /// The layer that this cloud belongs to.
    pub kind: PointCloudKind,

    /// The positions of the particles, in the local space of [`Self::transform`].
    pub positions: &'a [Vec3],

    /// The colours of the particles, one per position, or `None` if the whole cloud is
    /// uniformly white.
    pub colours: Option<&'a [Vec3]>,

    /// Where the cloud is in the scene.
    pub transform: Transform,

    /// The intensity of the glowing pulse, in [0, 1].
    pub pulse: f32,
}

/// The material parameters of a decoration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Material {
    /// The base colour of the decoration.
    pub colour: RGBArray,

    /// How strongly the decoration glows in its own colour.
    pub emissive_intensity: f32,

    /// The intensity of the small point light attached to the decoration.
    pub light_intensity: f32,

    /// The opacity of the decoration body, in [0, 1].
    pub opacity: f32,

    /// The opacity of the outer glow shell (gifts) or inner glowing core (ornaments).
    pub glow_opacity: f32,
}

/// A decoration as the renderer should draw it this frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecorationView {
    /// The identity of the decoration, to be passed back when it's clicked or hovered.
    pub id: DecorationId,

    /// What kind of decoration to draw.
    pub kind: DecorationKind,

    /// Where the decoration currently is, relative to the scene root.
    pub transform: Transform,

    /// How it should look.
    pub material: Material,
}

/// A wish in flight.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WishView<'a> {
    /// The identity of the wish.
    pub id: DecorationId,

    /// The transform of the sparkling head of the wish.
    pub transform: Transform,

    /// The trail behind the wish, newest point first.
    pub trail: &'a [Vec3],
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneFrame<'a> {
    /// The transform of the interactive group, which contains the tree, the rings, the topper,
    /// the decorations, and the wishes. Snow lives outside of this group.
    pub root: Transform,

    /// Whether the camera should slowly rotate around the tree by itself.
    ///
    /// This is true whenever hand tracking is off, since gestures drive the rotation otherwise.
    pub auto_rotate: bool,

    /// The transform of the heart on top of the tree, relative to the root.
    pub topper: Transform,

    /// All the particle layers.
    pub point_clouds: Vec<PointCloudView<'a>>,

    /// The point cloud drawn at the head of every wish, in its local space.
    pub wish_sparkle: PointCloudView<'a>,

    /// All the gifts and ornaments.
    pub decorations: Vec<DecorationView>,

    /// All the wishes currently in flight.
    pub wishes: Vec<WishView<'a>>,
}

impl SceneFrame<'_> {
    /// The total number of particles across all the point cloud layers.
    pub fn particle_count(&self) -> usize {
        self.point_clouds
            .iter()
            .map(|cloud| cloud.positions.len())
            .sum()
    }

    /// Iterate over the decorations of the given kind.
    pub fn decorations_of_kind(
        &self,
        kind: DecorationKind,
    ) -> impl Iterator<Item = &DecorationView> + '_ {
        self.decorations
            .iter()
            .filter(move |decoration| decoration.kind == kind)
    }
}
