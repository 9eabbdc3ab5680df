//! Visual/collision export of arbitrary objects (groups, parts, links, shapes)

use std::collections::HashSet;

use uuid::Uuid;

use crate::document::ObjectSource;
use crate::placement::Placement;
use crate::traversal::{SceneLeaf, flatten_leaves, resolve_selection};

use super::elements::mesh_uri;
use super::mesh::{MeshNameRegistry, mesh_fragment};
use super::options::ExportOptions;
use super::primitive::primitive_fragment;
use super::{ExportError, ExportRecord, ExportWarning, GeometryExport, GeometryRole};

/// Exports the geometry of several objects with shared state
///
/// Mesh file names stay unique across all calls made on one exporter and the
/// missing-package warning is raised at most once.
pub struct GeometryExporter<'a, S: ObjectSource + ?Sized> {
    source: &'a S,
    options: &'a ExportOptions,
    mesh_names: MeshNameRegistry,
    package_warned: bool,
    warnings: Vec<ExportWarning>,
}

impl<'a, S: ObjectSource + ?Sized> GeometryExporter<'a, S> {
    pub fn new(source: &'a S, options: &'a ExportOptions) -> Self {
        Self {
            source,
            options,
            mesh_names: MeshNameRegistry::new(options.mesh_extension.clone()),
            package_warned: false,
            warnings: Vec::new(),
        }
    }

    /// `<visual>` records of every leaf of `root`, see [`Self::export`]
    pub fn visual(
        &mut self,
        root: Uuid,
        placement: Option<Placement>,
    ) -> Result<Vec<ExportRecord>, ExportError> {
        self.export(root, GeometryRole::Visual, placement)
    }

    /// `<collision>` records of every leaf of `root`, see [`Self::export`]
    pub fn collision(
        &mut self,
        root: Uuid,
        placement: Option<Placement>,
    ) -> Result<Vec<ExportRecord>, ExportError> {
        self.export(root, GeometryRole::Collision, placement)
    }

    /// One record per leaf of `root`, in traversal order
    ///
    /// Leaf placements include the placement of `root` itself; `placement`,
    /// when given, is pre-multiplied to all of them. Primitive leaves become
    /// URDF primitives, all other leaves mesh references.
    pub fn export(
        &mut self,
        root: Uuid,
        role: GeometryRole,
        placement: Option<Placement>,
    ) -> Result<Vec<ExportRecord>, ExportError> {
        let base = placement.unwrap_or(Placement::IDENTITY);
        let leaves = flatten_leaves(self.source, root, base)?;
        tracing::debug!("Exporting {} {} leaves of {}", leaves.len(), role, root);
        leaves
            .into_iter()
            .map(|leaf| self.export_leaf(role, leaf))
            .collect()
    }

    /// Records of selected sub-objects, each at its global placement
    ///
    /// A selection is a root object and a path below it, see
    /// [`crate::traversal::global_placement`]. An object selected several
    /// times is exported once; unresolved paths are skipped with a warning.
    pub fn export_selection(
        &mut self,
        selection: &[(Uuid, &str)],
        role: GeometryRole,
    ) -> Result<Vec<ExportRecord>, ExportError> {
        let source = self.source;
        let mut exported = HashSet::new();
        let mut records = Vec::new();
        for (root, sub_fullpath) in selection {
            let Some((object, frame)) = resolve_selection(source, *root, sub_fullpath) else {
                self.warn(ExportWarning::UnresolvedSelection {
                    path: sub_fullpath.to_string(),
                });
                continue;
            };
            if !exported.insert(object.id) {
                tracing::debug!("\"{}\" already exported", object.label_or_name());
                continue;
            }
            records.extend(self.export(object.id, role, Some(frame))?);
        }
        Ok(records)
    }

    /// Warnings raised so far
    pub fn warnings(&self) -> &[ExportWarning] {
        &self.warnings
    }

    /// Consume the exporter, returning its warnings
    pub fn finish(self) -> Vec<ExportWarning> {
        self.warnings
    }

    fn export_leaf(
        &mut self,
        role: GeometryRole,
        leaf: SceneLeaf,
    ) -> Result<ExportRecord, ExportError> {
        // The leaf placement already folds in the object placement
        if let Some(xml) = primitive_fragment(role, &leaf.shape, leaf.placement) {
            return Ok(ExportRecord {
                xml,
                object: leaf.object,
                placement: leaf.placement,
                mesh_filename: String::new(),
            });
        }

        let (filename, warning) = self
            .mesh_names
            .register(leaf.object, &leaf.name, &leaf.label);
        if let Some(warning) = warning {
            self.warn(warning);
        }
        let package_name = self.package_name();
        let uri = mesh_uri(&package_name, &self.options.mesh_dir, &filename);
        let label = if leaf.label.is_empty() {
            &leaf.name
        } else {
            &leaf.label
        };
        tracing::debug!("\"{}\" ({}) exported as mesh {}", label, leaf.sub_path, uri);

        Ok(ExportRecord {
            xml: mesh_fragment(role, label, &uri, &leaf.placement),
            object: leaf.object,
            placement: leaf.placement,
            mesh_filename: filename,
        })
    }

    fn package_name(&mut self) -> String {
        if let Some(name) = self.options.package_name() {
            return name.to_string();
        }
        let fallback = self.options.fallback_package_name.clone();
        if !self.package_warned {
            self.package_warned = true;
            self.warn(ExportWarning::MissingPackageName {
                fallback: fallback.clone(),
            });
        }
        fallback
    }

    fn warn(&mut self, warning: ExportWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// `<visual>` records of an object, see [`GeometryExporter::export`]
pub fn visual_from_object<S: ObjectSource + ?Sized>(
    source: &S,
    root: Uuid,
    options: &ExportOptions,
    placement: Option<Placement>,
) -> Result<GeometryExport, ExportError> {
    from_object(source, root, GeometryRole::Visual, options, placement)
}

/// `<collision>` records of an object, see [`GeometryExporter::export`]
pub fn collision_from_object<S: ObjectSource + ?Sized>(
    source: &S,
    root: Uuid,
    options: &ExportOptions,
    placement: Option<Placement>,
) -> Result<GeometryExport, ExportError> {
    from_object(source, root, GeometryRole::Collision, options, placement)
}

fn from_object<S: ObjectSource + ?Sized>(
    source: &S,
    root: Uuid,
    role: GeometryRole,
    options: &ExportOptions,
    placement: Option<Placement>,
) -> Result<GeometryExport, ExportError> {
    let mut exporter = GeometryExporter::new(source, options);
    let records = exporter.export(root, role, placement)?;
    Ok(GeometryExport {
        records,
        warnings: exporter.finish(),
    })
}
