//! Core pose data types.
//!
//! A pose is a 7-component vector: components 0..3 are the translation
//! (x, y, z) in scene units, components 3..7 a raw rotation 4-vector.
//! The rotation is not required to be unit-norm; normalization happens
//! only inside the angular error metric.

use crate::error::PoseCoreError;
use crate::quat::angular_distance_deg;

/// Number of translation components.
pub const TRANSLATION_DIM: usize = 3;

/// Number of rotation components.
pub const ROTATION_DIM: usize = 4;

/// Total components in a ground-truth pose vector.
pub const POSE_DIM: usize = TRANSLATION_DIM + ROTATION_DIM;

/// A camera pose: translation plus a raw rotation 4-vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Translation (x, y, z) in scene units.
    pub translation: [f32; TRANSLATION_DIM],
    /// Rotation as a raw 4-vector (double-cover representation).
    pub rotation: [f32; ROTATION_DIM],
}

impl Pose {
    /// Create a pose from explicit translation and rotation parts.
    pub const fn new(translation: [f32; TRANSLATION_DIM], rotation: [f32; ROTATION_DIM]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Parse a pose from a 7-component slice (translation first).
    pub fn from_slice(values: &[f32]) -> Result<Self, PoseCoreError> {
        if values.len() != POSE_DIM {
            return Err(PoseCoreError::PoseLength {
                expected: POSE_DIM,
                got: values.len(),
            });
        }
        Ok(Self {
            translation: [values[0], values[1], values[2]],
            rotation: [values[3], values[4], values[5], values[6]],
        })
    }

    /// Flatten into the canonical 7-component layout.
    pub const fn as_array(&self) -> [f32; POSE_DIM] {
        [
            self.translation[0],
            self.translation[1],
            self.translation[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
            self.rotation[3],
        ]
    }

    /// Euclidean distance between the translations of two poses.
    pub fn translation_distance(&self, other: &Self) -> f32 {
        let dx = self.translation[0] - other.translation[0];
        let dy = self.translation[1] - other.translation[1];
        let dz = self.translation[2] - other.translation[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Angular distance between the rotations of two poses, in degrees.
    pub fn rotation_angle_to(&self, other: &Self) -> f32 {
        angular_distance_deg(&self.rotation, &other.rotation)
    }
}
