//! CAD object snapshot and its kind

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::placement::Placement;
use crate::shape::{BoxShape, CylinderShape, LeafShape, SphereShape};

use super::bounds::BoundBox;

/// Kind of a CAD object, with its type-specific data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Box(BoxShape),
    Cylinder(CylinderShape),
    Sphere(SphereShape),
    /// Triangulated mesh
    Mesh,
    /// Any other solid (boolean result, extrusion, ...)
    Feature,
    /// Plain container, has no placement of its own
    Group { children: Vec<Uuid> },
    /// Container with a placement applied to its children
    Part { children: Vec<Uuid> },
    /// Lightweight instance of another object
    Link {
        target: Uuid,
        /// Also apply the target's own placement under the link placement
        #[serde(default)]
        link_transform: bool,
    },
    /// Local coordinate system marker
    CoordinateSystem,
}

impl ObjectKind {
    /// Human readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Box(_) => "box",
            ObjectKind::Cylinder(_) => "cylinder",
            ObjectKind::Sphere(_) => "sphere",
            ObjectKind::Mesh => "mesh",
            ObjectKind::Feature => "feature",
            ObjectKind::Group { .. } => "group",
            ObjectKind::Part { .. } => "part",
            ObjectKind::Link { .. } => "link",
            ObjectKind::CoordinateSystem => "coordinate system",
        }
    }

    /// Children of a container (group or part)
    pub fn children(&self) -> Option<&[Uuid]> {
        match self {
            ObjectKind::Group { children } | ObjectKind::Part { children } => {
                Some(children.as_slice())
            }
            _ => None,
        }
    }

    /// Classification of a geometric leaf, `None` for containers, links and markers
    pub fn leaf_shape(&self) -> Option<LeafShape> {
        match self {
            ObjectKind::Box(shape) => Some(LeafShape::Box(*shape)),
            ObjectKind::Cylinder(shape) => Some(LeafShape::Cylinder(*shape)),
            ObjectKind::Sphere(shape) => Some(LeafShape::Sphere(*shape)),
            ObjectKind::Mesh => Some(LeafShape::MeshRef),
            ObjectKind::Feature => Some(LeafShape::Unsupported),
            ObjectKind::Group { .. }
            | ObjectKind::Part { .. }
            | ObjectKind::Link { .. }
            | ObjectKind::CoordinateSystem => None,
        }
    }
}

/// Read-only snapshot of one object of a CAD document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadObject {
    pub id: Uuid,
    /// Internal name, unique within a document
    pub name: String,
    /// User-visible label, not necessarily unique
    pub label: String,
    /// Placement relative to the parent container (None for groups)
    pub placement: Option<Placement>,
    pub kind: ObjectKind,
    /// Axis-aligned bounding box in the global frame (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_box: Option<BoundBox>,
}

impl CadObject {
    /// Create a new object; the label defaults to the name
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        let name = name.into();
        let placement = match kind {
            ObjectKind::Group { .. } => None,
            _ => Some(Placement::IDENTITY),
        };
        Self {
            id: Uuid::new_v4(),
            label: name.clone(),
            name,
            placement,
            kind,
            bound_box: None,
        }
    }

    pub fn new_box(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self::new(name, ObjectKind::Box(BoxShape::new(length, width, height)))
    }

    pub fn new_cylinder(name: impl Into<String>, radius: f64, height: f64) -> Self {
        Self::new(name, ObjectKind::Cylinder(CylinderShape::new(radius, height)))
    }

    pub fn new_sphere(name: impl Into<String>, radius: f64) -> Self {
        Self::new(name, ObjectKind::Sphere(SphereShape::new(radius)))
    }

    pub fn new_mesh(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Mesh)
    }

    pub fn new_group(name: impl Into<String>, children: Vec<Uuid>) -> Self {
        Self::new(name, ObjectKind::Group { children })
    }

    pub fn new_part(name: impl Into<String>, children: Vec<Uuid>) -> Self {
        Self::new(name, ObjectKind::Part { children })
    }

    pub fn new_link(name: impl Into<String>, target: Uuid) -> Self {
        Self::new(
            name,
            ObjectKind::Link {
                target,
                link_transform: false,
            },
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn without_placement(mut self) -> Self {
        self.placement = None;
        self
    }

    pub fn with_bound_box(mut self, bound_box: BoundBox) -> Self {
        self.bound_box = Some(bound_box);
        self
    }

    /// Label, or the internal name when the label is empty
    pub fn label_or_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn has_placement(&self) -> bool {
        self.placement.is_some()
    }

    pub fn is_box(&self) -> bool {
        matches!(self.kind, ObjectKind::Box(_))
    }

    pub fn is_cylinder(&self) -> bool {
        matches!(self.kind, ObjectKind::Cylinder(_))
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self.kind, ObjectKind::Sphere(_))
    }

    pub fn is_primitive(&self) -> bool {
        self.is_box() || self.is_cylinder() || self.is_sphere()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ObjectKind::Group { .. })
    }

    pub fn is_part(&self) -> bool {
        matches!(self.kind, ObjectKind::Part { .. })
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, ObjectKind::Link { .. })
    }

    pub fn is_lcs(&self) -> bool {
        matches!(self.kind, ObjectKind::CoordinateSystem)
    }

    /// Target of a link
    pub fn linked_object(&self) -> Option<Uuid> {
        match self.kind {
            ObjectKind::Link { target, .. } => Some(target),
            _ => None,
        }
    }
}
