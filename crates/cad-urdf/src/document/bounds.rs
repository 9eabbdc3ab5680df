//! Axis-aligned bounding box of CAD geometry (mm)

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundBox {
    /// Minimum corner of the bounding box.
    pub min: DVec3,
    /// Maximum corner of the bounding box.
    pub max: DVec3,
}

impl BoundBox {
    /// Creates a new bounding box from min and max points.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size (full extents) of the bounding box.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the diagonal between the min and max corners.
    pub fn diagonal_length(&self) -> f64 {
        self.size().length()
    }
}
