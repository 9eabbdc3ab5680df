//! Mesh references for geometry that is not a URDF primitive

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::document::CadObject;
use crate::placement::Placement;

use super::elements::{urdf_geometry_mesh, urdf_geometry_mesh_uri, urdf_origin_from_placement};
use super::xml::{XmlElement, sanitize_filename};
use super::{ExportError, ExportWarning, GeometryRole};

/// Gives each exported object a unique mesh file name
///
/// Names derive from the object label. An object keeps its name for the
/// whole export; a different object with the same label is disambiguated
/// with its internal name, then with a counter.
#[derive(Debug, Clone, Default)]
pub struct MeshNameRegistry {
    extension: String,
    by_object: HashMap<Uuid, String>,
    taken: HashSet<String>,
}

impl MeshNameRegistry {
    /// `extension` is given without the dot
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..Default::default()
        }
    }

    /// File name of an object, and a warning when its label had to be
    /// disambiguated
    pub fn register(
        &mut self,
        object: Uuid,
        name: &str,
        label: &str,
    ) -> (String, Option<ExportWarning>) {
        if let Some(filename) = self.by_object.get(&object) {
            return (filename.clone(), None);
        }

        let stem = sanitize_filename(if label.is_empty() { name } else { label });
        let mut filename = self.file_name(&stem);
        let mut warning = None;
        if self.taken.contains(&filename) {
            let stem = format!("{}_{}", stem, sanitize_filename(name));
            filename = self.file_name(&stem);
            let mut index = 2;
            while self.taken.contains(&filename) {
                filename = self.file_name(&format!("{stem}_{index}"));
                index += 1;
            }
            warning = Some(ExportWarning::DuplicateMeshName {
                label: label.to_string(),
                filename: filename.clone(),
            });
        }

        self.taken.insert(filename.clone());
        self.by_object.insert(object, filename.clone());
        (filename, warning)
    }

    pub fn len(&self) -> usize {
        self.by_object.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_object.is_empty()
    }

    fn file_name(&self, stem: &str) -> String {
        if self.extension.is_empty() {
            stem.to_string()
        } else {
            format!("{}.{}", stem, self.extension)
        }
    }
}

/// `<visual>` referencing `package://{package_name}/meshes/{mesh_name}`
///
/// The mesh itself is not exported. `placement` replaces the placement of
/// the object when given.
pub fn visual_mesh(
    object: &CadObject,
    mesh_name: &str,
    package_name: &str,
    placement: Option<Placement>,
) -> Result<XmlElement, ExportError> {
    generic_mesh(object, GeometryRole::Visual, mesh_name, package_name, placement)
}

/// `<collision>` referencing a mesh, see [`visual_mesh`]
pub fn collision_mesh(
    object: &CadObject,
    mesh_name: &str,
    package_name: &str,
    placement: Option<Placement>,
) -> Result<XmlElement, ExportError> {
    generic_mesh(object, GeometryRole::Collision, mesh_name, package_name, placement)
}

fn generic_mesh(
    object: &CadObject,
    role: GeometryRole,
    mesh_name: &str,
    package_name: &str,
    placement: Option<Placement>,
) -> Result<XmlElement, ExportError> {
    let placement = placement
        .or(object.placement)
        .ok_or_else(|| ExportError::MissingPlacement(object.label_or_name().to_string()))?;
    Ok(mesh_fragment_with(
        role,
        object.label_or_name(),
        &placement,
        urdf_geometry_mesh(mesh_name, package_name),
    ))
}

/// Mesh fragment for an already resolved package URI
pub(crate) fn mesh_fragment(
    role: GeometryRole,
    label: &str,
    uri: &str,
    placement: &Placement,
) -> XmlElement {
    mesh_fragment_with(role, label, placement, urdf_geometry_mesh_uri(uri))
}

fn mesh_fragment_with(
    role: GeometryRole,
    label: &str,
    placement: &Placement,
    geometry: XmlElement,
) -> XmlElement {
    let mut fragment = XmlElement::new(role.tag());
    fragment.push_comment(label);
    fragment.push(urdf_origin_from_placement(placement));
    fragment.push(geometry);
    fragment
}
