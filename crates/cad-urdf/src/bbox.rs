//! Primitives enclosing the bounding box of selected objects
//!
//! Typically used to build simple collision geometry around detailed meshes.

use glam::DVec3;
use uuid::Uuid;

use crate::document::{BoundBox, CadObject, ObjectSource};
use crate::export::ExportWarning;
use crate::placement::Placement;

/// Primitives built for a selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingPrimitives {
    /// New objects, one per compatible selected object, for the host to insert
    pub objects: Vec<CadObject>,
    /// One warning per skipped object
    pub warnings: Vec<ExportWarning>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundingBoxError {
    #[error("No compatible object selected")]
    NoCompatibleObject,
}

/// Boxes matching the bounding boxes of `selection`
///
/// Each box is axis-aligned with its corner at the bounding box minimum.
pub fn box_from_bounding_box<S: ObjectSource + ?Sized>(
    source: &S,
    selection: &[Uuid],
) -> Result<BoundingPrimitives, BoundingBoxError> {
    from_bounding_box(source, selection, |name, bbox| {
        CadObject::new_box(name, bbox.size().x, bbox.size().y, bbox.size().z)
            .with_placement(Placement::from_translation(bbox.min))
    })
}

/// Spheres centered on the bounding boxes of `selection`, with half the
/// bounding box diagonal as radius
pub fn sphere_from_bounding_box<S: ObjectSource + ?Sized>(
    source: &S,
    selection: &[Uuid],
) -> Result<BoundingPrimitives, BoundingBoxError> {
    from_bounding_box(source, selection, |name, bbox| {
        CadObject::new_sphere(name, bbox.diagonal_length() / 2.0)
            .with_placement(Placement::from_translation(bbox.center()))
    })
}

/// Vertical cylinders around the bounding boxes of `selection`
///
/// The bottom disc is centered under the bounding box center at its lowest
/// Z, the radius is half the bounding box diagonal.
pub fn cylinder_from_bounding_box<S: ObjectSource + ?Sized>(
    source: &S,
    selection: &[Uuid],
) -> Result<BoundingPrimitives, BoundingBoxError> {
    from_bounding_box(source, selection, |name, bbox| {
        let center = bbox.center();
        CadObject::new_cylinder(name, bbox.diagonal_length() / 2.0, bbox.size().z)
            .with_placement(Placement::from_translation(DVec3::new(
                center.x, center.y, bbox.min.z,
            )))
    })
}

fn from_bounding_box<S: ObjectSource + ?Sized>(
    source: &S,
    selection: &[Uuid],
    make: impl Fn(String, &BoundBox) -> CadObject,
) -> Result<BoundingPrimitives, BoundingBoxError> {
    let mut out = BoundingPrimitives::default();
    for id in selection {
        let object = source.object(*id);
        let Some((object, bbox)) = object.and_then(|o| o.bound_box.map(|b| (o, b))) else {
            let label = object.map_or_else(|| id.to_string(), |o| o.label_or_name().to_string());
            let warning = ExportWarning::IncompatibleObject { label };
            tracing::warn!("{}", warning);
            out.warnings.push(warning);
            continue;
        };
        let primitive = make(format!("Bbox_{}", object.name), &bbox)
            .with_label(format!("{}_bbox", object.label_or_name()))
            .with_bound_box(bbox);
        tracing::debug!("Created \"{}\" from \"{}\"", primitive.label, object.label_or_name());
        out.objects.push(primitive);
    }
    if out.objects.is_empty() {
        return Err(BoundingBoxError::NoCompatibleObject);
    }
    Ok(out)
}
