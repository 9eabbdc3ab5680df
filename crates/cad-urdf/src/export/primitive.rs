//! `<visual>`/`<collision>` fragments of boxes, cylinders and spheres
//!
//! URDF places primitives at their centroid while the CAD host places boxes
//! at a corner and cylinders at the center of their bottom disc, so every
//! emitter goes through a centering step first.

use crate::document::{CadObject, ObjectKind};
use crate::placement::Placement;
use crate::shape::{BoxShape, CylinderShape, LeafShape, SphereShape};

use super::elements::{
    urdf_geometry_box, urdf_geometry_cylinder, urdf_geometry_sphere, urdf_origin_from_placement,
};
use super::xml::XmlElement;
use super::{ExportError, GeometryRole};

// ============== Centering ==============

/// Placement of the center of a box placed at its lower-left-bottom corner
///
/// `placement` replaces the placement of the box when given.
pub fn box_center_placement(
    object: &CadObject,
    placement: Option<Placement>,
) -> Result<Placement, ExportError> {
    let shape = expect_box(object)?;
    let placement = placement_or_own(object, placement)?;
    Ok(placement.translated_local(shape.center_offset()))
}

/// Placement of the center of a cylinder placed at its bottom disc
///
/// `placement` replaces the placement of the cylinder when given.
pub fn cylinder_center_placement(
    object: &CadObject,
    placement: Option<Placement>,
) -> Result<Placement, ExportError> {
    let shape = expect_cylinder(object)?;
    let placement = placement_or_own(object, placement)?;
    Ok(placement.translated_local(shape.center_offset()))
}

/// Placement of the center of a sphere, which is its own placement
pub fn sphere_center_placement(
    object: &CadObject,
    placement: Option<Placement>,
) -> Result<Placement, ExportError> {
    expect_sphere(object)?;
    placement_or_own(object, placement)
}

// ============== Object-level emitters ==============

/// `<visual>` of a box
///
/// `placement` is pre-multiplied to the placement of the box, unless
/// `ignore_obj_placement` is set, in which case it is the placement of the
/// box.
pub fn visual_from_box(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    generic_from_box(object, GeometryRole::Visual, placement, ignore_obj_placement)
}

/// `<collision>` of a box, see [`visual_from_box`]
pub fn collision_from_box(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    generic_from_box(object, GeometryRole::Collision, placement, ignore_obj_placement)
}

/// `<visual>` of a cylinder, see [`visual_from_box`] for `placement`
pub fn visual_from_cylinder(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    generic_from_cylinder(object, GeometryRole::Visual, placement, ignore_obj_placement)
}

pub fn collision_from_cylinder(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    generic_from_cylinder(object, GeometryRole::Collision, placement, ignore_obj_placement)
}

/// `<visual>` of a sphere, see [`visual_from_box`] for `placement`
pub fn visual_from_sphere(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    generic_from_sphere(object, GeometryRole::Visual, placement, ignore_obj_placement)
}

pub fn collision_from_sphere(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    generic_from_sphere(object, GeometryRole::Collision, placement, ignore_obj_placement)
}

fn generic_from_box(
    object: &CadObject,
    role: GeometryRole,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    let shape = expect_box(object)?;
    let placement = compose_placement(object, placement, ignore_obj_placement)?;
    Ok(box_fragment(role, shape, placement))
}

fn generic_from_cylinder(
    object: &CadObject,
    role: GeometryRole,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    let shape = expect_cylinder(object)?;
    let placement = compose_placement(object, placement, ignore_obj_placement)?;
    Ok(cylinder_fragment(role, shape, placement))
}

fn generic_from_sphere(
    object: &CadObject,
    role: GeometryRole,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<XmlElement, ExportError> {
    let shape = expect_sphere(object)?;
    let placement = compose_placement(object, placement, ignore_obj_placement)?;
    Ok(sphere_fragment(role, shape, placement))
}

// ============== Shape-level emitters ==============

/// Fragment of a classified primitive leaf, `None` for meshes
pub(crate) fn primitive_fragment(
    role: GeometryRole,
    shape: &LeafShape,
    placement: Placement,
) -> Option<XmlElement> {
    match shape {
        LeafShape::Box(shape) => Some(box_fragment(role, shape, placement)),
        LeafShape::Cylinder(shape) => Some(cylinder_fragment(role, shape, placement)),
        LeafShape::Sphere(shape) => Some(sphere_fragment(role, shape, placement)),
        LeafShape::MeshRef | LeafShape::Unsupported => None,
    }
}

fn box_fragment(role: GeometryRole, shape: &BoxShape, placement: Placement) -> XmlElement {
    let center = placement.translated_local(shape.center_offset());
    let [length, width, height] = shape.size_m();
    XmlElement::new(role.tag())
        .with_child(urdf_origin_from_placement(&center))
        .with_child(urdf_geometry_box(length, width, height))
}

fn cylinder_fragment(
    role: GeometryRole,
    shape: &CylinderShape,
    placement: Placement,
) -> XmlElement {
    let center = placement.translated_local(shape.center_offset());
    XmlElement::new(role.tag())
        .with_child(urdf_origin_from_placement(&center))
        .with_child(urdf_geometry_cylinder(shape.radius_m(), shape.length_m()))
}

fn sphere_fragment(role: GeometryRole, shape: &SphereShape, placement: Placement) -> XmlElement {
    XmlElement::new(role.tag())
        .with_child(urdf_origin_from_placement(&placement))
        .with_child(urdf_geometry_sphere(shape.radius_m()))
}

// ============== Helpers ==============

fn compose_placement(
    object: &CadObject,
    placement: Placement,
    ignore_obj_placement: bool,
) -> Result<Placement, ExportError> {
    if ignore_obj_placement {
        return Ok(placement);
    }
    let own = object
        .placement
        .ok_or_else(|| ExportError::MissingPlacement(object.label_or_name().to_string()))?;
    Ok(placement * own)
}

fn placement_or_own(
    object: &CadObject,
    placement: Option<Placement>,
) -> Result<Placement, ExportError> {
    placement
        .or(object.placement)
        .ok_or_else(|| ExportError::MissingPlacement(object.label_or_name().to_string()))
}

fn invalid_kind(object: &CadObject, expected: &'static str) -> ExportError {
    ExportError::InvalidKind {
        expected,
        found: object.type_name(),
        label: object.label_or_name().to_string(),
    }
}

fn expect_box(object: &CadObject) -> Result<&BoxShape, ExportError> {
    match &object.kind {
        ObjectKind::Box(shape) => Ok(shape),
        _ => Err(invalid_kind(object, "box")),
    }
}

fn expect_cylinder(object: &CadObject) -> Result<&CylinderShape, ExportError> {
    match &object.kind {
        ObjectKind::Cylinder(shape) => Ok(shape),
        _ => Err(invalid_kind(object, "cylinder")),
    }
}

fn expect_sphere(object: &CadObject) -> Result<&SphereShape, ExportError> {
    match &object.kind {
        ObjectKind::Sphere(shape) => Ok(shape),
        _ => Err(invalid_kind(object, "sphere")),
    }
}
