//! Rigid placements (translation in mm + rotation quaternion)

use std::ops::{Mul, MulAssign};

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{EPS, mm_to_m};
use crate::rotation::{Rpy, rpy_from_quaternion};

/// Placement of a CAD object: translation (mm) and rotation
///
/// `a * b` applies `b` first, then `a` in the parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Translation in millimeters
    pub base: DVec3,
    /// Rotation, normalized before use
    pub rotation: DQuat,
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    pub const IDENTITY: Self = Self {
        base: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub fn new(base: DVec3, rotation: DQuat) -> Self {
        Self { base, rotation }
    }

    pub fn from_translation(base: DVec3) -> Self {
        Self {
            base,
            rotation: DQuat::IDENTITY,
        }
    }

    pub fn from_rotation(rotation: DQuat) -> Self {
        Self {
            base: DVec3::ZERO,
            rotation,
        }
    }

    /// Placement of a rigid homogeneous matrix (translation in mm)
    pub fn from_matrix(matrix: &DMat4) -> Self {
        Self {
            base: matrix.w_axis.truncate(),
            rotation: DQuat::from_mat4(matrix),
        }
    }

    /// Homogeneous matrix of this placement (translation in mm)
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.normalized_rotation(), self.base)
    }

    /// Unit rotation; degenerate (near-zero) quaternions become the identity
    pub fn normalized_rotation(&self) -> DQuat {
        let norm_squared = self.rotation.length_squared();
        if norm_squared < EPS {
            DQuat::IDENTITY
        } else {
            self.rotation * (1.0 / norm_squared.sqrt())
        }
    }

    /// Transform a point given in the local frame into the parent frame
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.normalized_rotation() * point + self.base
    }

    /// Rotate a vector given in the local frame into the parent frame
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.normalized_rotation() * vector
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.normalized_rotation().inverse();
        Self {
            base: -(rotation * self.base),
            rotation,
        }
    }

    /// Translate along the local axes
    pub fn translated_local(&self, offset: DVec3) -> Self {
        *self * Self::from_translation(offset)
    }

    /// Translation converted to meters
    pub fn base_m(&self) -> [f64; 3] {
        [mm_to_m(self.base.x), mm_to_m(self.base.y), mm_to_m(self.base.z)]
    }

    /// Rotation as URDF roll-pitch-yaw
    pub fn rpy(&self) -> Rpy {
        rpy_from_quaternion(self.rotation)
    }

    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f64) -> bool {
        let (a, b) = (self.normalized_rotation(), other.normalized_rotation());
        // q and -q are the same rotation
        self.base.abs_diff_eq(other.base, max_abs_diff)
            && (a.abs_diff_eq(b, max_abs_diff) || a.abs_diff_eq(-b, max_abs_diff))
    }
}

impl Mul for Placement {
    type Output = Placement;

    fn mul(self, rhs: Placement) -> Placement {
        let rotation = self.normalized_rotation();
        Placement {
            base: self.base + rotation * rhs.base,
            rotation: rotation * rhs.normalized_rotation(),
        }
    }
}

impl MulAssign for Placement {
    fn mul_assign(&mut self, rhs: Placement) {
        *self = *self * rhs;
    }
}
