//! URDF export functionality
//!
//! Objects are first flattened into placed leaves (see [`crate::traversal`]),
//! then each leaf is turned into a `<visual>` or `<collision>` fragment:
//! primitives (box, cylinder, sphere) as URDF geometry centered on their
//! centroid, everything else as a reference to a mesh file.

mod dispatch;
mod elements;
mod format;
mod group;
mod joint;
mod mesh;
mod options;
mod primitive;
mod robot;
mod xml;

use uuid::Uuid;

use crate::placement::Placement;
use crate::traversal::TraversalError;

pub use dispatch::{GeometryExporter, collision_from_object, visual_from_object};
pub use elements::{
    mesh_uri, urdf_geometry_box, urdf_geometry_cylinder, urdf_geometry_mesh,
    urdf_geometry_sphere, urdf_origin_from_placement,
};
pub use format::{format_float, format_significant};
pub use group::{AnchorKind, GroupValidation, JointAnchor, export_group_with_lcs};
pub use joint::{JointType, RobotJointSpec, urdf_joint};
pub use mesh::{MeshNameRegistry, collision_mesh, visual_mesh};
pub use options::{ExportOptions, OptionsError};
pub use primitive::{
    box_center_placement, collision_from_box, collision_from_cylinder, collision_from_sphere,
    cylinder_center_placement, sphere_center_placement, visual_from_box, visual_from_cylinder,
    visual_from_sphere,
};
pub use robot::{RobotExport, RobotLinkSpec, export_robot};
pub use xml::{XmlElement, XmlNode, sanitize_filename, valid_urdf_name, xml_comment, xml_escape};

/// Semantic role of a geometry fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryRole {
    Visual,
    Collision,
}

impl GeometryRole {
    /// XML tag of the fragment
    pub fn tag(&self) -> &'static str {
        match self {
            GeometryRole::Visual => "visual",
            GeometryRole::Collision => "collision",
        }
    }
}

impl std::fmt::Display for GeometryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One exported leaf: the fragment and where it comes from
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    /// `<visual>` or `<collision>` element
    pub xml: XmlElement,
    /// Leaf object the fragment was built from
    pub object: Uuid,
    /// Placement of the leaf reference point (not centered), in mm
    pub placement: Placement,
    /// Mesh file name (with extension) for mesh references, empty for primitives
    pub mesh_filename: String,
}

impl ExportRecord {
    pub fn is_mesh(&self) -> bool {
        !self.mesh_filename.is_empty()
    }
}

/// Result of exporting the geometry of one object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryExport {
    /// One record per leaf, in traversal order
    pub records: Vec<ExportRecord>,
    pub warnings: Vec<ExportWarning>,
}

/// Recoverable conditions met during an export
///
/// They are logged when they arise and returned alongside the output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportWarning {
    #[error("No package name given but mesh found, using \"{fallback}\"")]
    MissingPackageName { fallback: String },
    #[error("Mesh name of \"{label}\" already used, exporting as \"{filename}\"")]
    DuplicateMeshName { label: String, filename: String },
    #[error("\"{label}\" is not a link, ignoring")]
    NotALink { label: String },
    #[error("Linked object of \"{label}\" is not a coordinate system or part, ignoring")]
    UnsupportedLinkTarget { label: String },
    #[error("\"{label}\" has no bounding box, ignoring")]
    IncompatibleObject { label: String },
    #[error("Selection \"{path}\" does not designate an object, ignoring")]
    UnresolvedSelection { path: String },
}

/// Export-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("\"{label}\" must be a {expected}, found a {found}")]
    InvalidKind {
        expected: &'static str,
        found: &'static str,
        label: String,
    },
    #[error("\"{0}\" has no placement and none was given")]
    MissingPlacement(String),
    #[error("\"{0}\" must be a group")]
    NotAGroup(String),
    #[error("Object not found: {0}")]
    ObjectNotFound(Uuid),
    #[error("Duplicate link name: {0}")]
    DuplicateLinkName(String),
    #[error("Duplicate joint name: {0}")]
    DuplicateJointName(String),
    #[error("Generated URDF is invalid: {0}")]
    InvalidUrdf(String),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}
