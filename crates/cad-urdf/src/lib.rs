//! CAD to URDF export core
//!
//! This crate converts a snapshot of a CAD document into URDF fragments:
//! - Rotation: quaternion <-> roll-pitch-yaw conversions
//! - Placement: rigid transforms in the CAD host convention (mm)
//! - Document: serializable snapshot of the CAD object tree
//! - Traversal: flattening of groups, parts and links into placed leaves
//! - Export: `<visual>`/`<collision>` fragments and `<robot>` documents
//! - Bbox: primitives built from bounding boxes

pub mod bbox;
pub mod constants;
pub mod document;
pub mod export;
pub mod placement;
pub mod rotation;
pub mod shape;
pub mod traversal;

pub use bbox::*;
pub use constants::*;
pub use document::*;
pub use export::*;
pub use placement::*;
pub use rotation::*;
pub use shape::*;
pub use traversal::*;
