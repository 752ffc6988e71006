//! This module provides [`Transform`].

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The position, orientation, and uniform scale of something in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Where the object is.
    pub translation: Vec3,

    /// The rotation of the object as Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,

    /// The uniform scale of the object.
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The transform that does nothing.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.,
    };

    /// Create an unrotated, unscaled transform at the given position.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Return this transform with the given rotation.
    pub fn with_rotation(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }

    /// Return this transform with the given uniform scale.
    pub fn with_scale(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    /// The rotation of this transform as a quaternion.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Compute the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.translation)
    }

    /// Move a point from the local space of this transform into its parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.quat() * (point * self.scale)
    }
}
