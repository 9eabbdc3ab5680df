//! Primitive shape dimensions and the leaf classification used by export

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::mm_to_m;

/// Box with its placement at the lower-left-bottom corner (dimensions in mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    /// Extent along local X
    pub length: f64,
    /// Extent along local Y
    pub width: f64,
    /// Extent along local Z
    pub height: f64,
}

impl BoxShape {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Offset from the corner to the center, in local axes
    pub fn center_offset(&self) -> DVec3 {
        DVec3::new(self.length, self.width, self.height) / 2.0
    }

    /// `[length, width, height]` in meters
    pub fn size_m(&self) -> [f64; 3] {
        [mm_to_m(self.length), mm_to_m(self.width), mm_to_m(self.height)]
    }
}

/// Cylinder along local Z with its placement at the center of the bottom disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderShape {
    pub radius: f64,
    pub height: f64,
}

impl CylinderShape {
    pub fn new(radius: f64, height: f64) -> Self {
        Self { radius, height }
    }

    /// Offset from the bottom disc to the center, in local axes
    pub fn center_offset(&self) -> DVec3 {
        DVec3::new(0.0, 0.0, self.height / 2.0)
    }

    pub fn radius_m(&self) -> f64 {
        mm_to_m(self.radius)
    }

    pub fn length_m(&self) -> f64 {
        mm_to_m(self.height)
    }
}

/// Sphere with its placement at its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereShape {
    pub radius: f64,
}

impl SphereShape {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius_m(&self) -> f64 {
        mm_to_m(self.radius)
    }
}

/// Geometry of a resolved leaf, classified once during traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafShape {
    Box(BoxShape),
    Cylinder(CylinderShape),
    Sphere(SphereShape),
    /// A mesh object, exported as a file reference
    MeshRef,
    /// Any other geometry, also exported as a mesh file reference
    Unsupported,
}

impl LeafShape {
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            LeafShape::Box(_) | LeafShape::Cylinder(_) | LeafShape::Sphere(_)
        )
    }
}
