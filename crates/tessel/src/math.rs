//! Math types and glam re-exports.
//!
//! Generated meshes are unit-sized and centered at the origin; every object
//! in a scene is placed, rotated and scaled by a [`Transform`] rather than by
//! regenerating its geometry.

use serde::{Deserialize, Serialize};

pub use glam::{Mat4, Quat, Vec3};

/// A 3D transform: position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform (origin, no rotation, uniform scale of 1).
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform at the given position.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    /// Return a copy with a per-axis scale.
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    /// Return a copy rotated by `degrees` about `axis` (normalized here).
    pub fn with_rotation(mut self, axis: Vec3, degrees: f32) -> Self {
        self.rotation = Quat::from_axis_angle(axis.normalize_or(Vec3::Y), degrees.to_radians());
        self
    }

    /// Compute the 4x4 model matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Inverse transpose of the model matrix, for transforming normals under
    /// non-uniform scale.
    pub fn normal_matrix(&self) -> Mat4 {
        self.matrix().inverse().transpose()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Serialized form of a [`Transform`]: rotation as axis + angle in degrees,
/// which is easier to write by hand than a quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformDesc {
    pub translation: [f32; 3],
    pub rotation_axis: [f32; 3],
    pub rotation_degrees: f32,
    pub scale: [f32; 3],
}

impl Default for TransformDesc {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation_axis: [0.0, 1.0, 0.0],
            rotation_degrees: 0.0,
            scale: [1.0; 3],
        }
    }
}

impl TransformDesc {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: [x, y, z],
            ..Self::default()
        }
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = [x, y, z];
        self
    }
}

impl From<TransformDesc> for Transform {
    fn from(desc: TransformDesc) -> Self {
        let [x, y, z] = desc.translation;
        let [sx, sy, sz] = desc.scale;
        Transform::from_xyz(x, y, z)
            .with_scale(sx, sy, sz)
            .with_rotation(Vec3::from(desc.rotation_axis), desc.rotation_degrees)
    }
}
