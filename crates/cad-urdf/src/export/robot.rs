//! Assembly of a `<robot>` document from exported geometry

use std::collections::HashSet;

use uuid::Uuid;

use crate::document::ObjectSource;
use crate::placement::Placement;

use super::dispatch::GeometryExporter;
use super::joint::{RobotJointSpec, urdf_joint};
use super::options::ExportOptions;
use super::xml::{XmlElement, valid_urdf_name};
use super::{ExportError, ExportRecord, ExportWarning};

/// A URDF link and the objects providing its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RobotLinkSpec {
    pub name: String,
    /// Object exported as `<visual>` elements
    pub visual: Option<Uuid>,
    /// Object exported as `<collision>` elements
    pub collision: Option<Uuid>,
    /// Pre-multiplied to the placements of the exported geometry
    pub placement: Option<Placement>,
}

impl RobotLinkSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visual: None,
            collision: None,
            placement: None,
        }
    }

    /// Link with visual and collision taken from the same object
    pub fn from_object(name: impl Into<String>, object: Uuid) -> Self {
        Self {
            visual: Some(object),
            collision: Some(object),
            ..Self::new(name)
        }
    }
}

/// A generated URDF document
#[derive(Debug, Clone, PartialEq)]
pub struct RobotExport {
    /// `<robot>` element
    pub xml: XmlElement,
    /// Every exported fragment, link by link
    pub records: Vec<ExportRecord>,
    pub warnings: Vec<ExportWarning>,
}

impl RobotExport {
    /// Full URDF file content
    pub fn to_urdf_string(&self) -> String {
        format!("<?xml version=\"1.0\"?>\n{}", self.xml.to_string_pretty())
    }

    /// Mesh files referenced by the document, without duplicates, in order
    pub fn mesh_filenames(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| record.is_mesh())
            .map(|record| record.mesh_filename.as_str())
            .filter(|filename| seen.insert(*filename))
            .collect()
    }

    /// Parse the generated document back
    pub fn validate(&self) -> Result<urdf_rs::Robot, ExportError> {
        urdf_rs::read_from_string(&self.to_urdf_string())
            .map_err(|e| ExportError::InvalidUrdf(e.to_string()))
    }
}

/// Build a `<robot>` with one `<link>` per entry of `links`, then one
/// `<joint>` per entry of `joints`, in order
///
/// Link and joint names go through [`valid_urdf_name`] and must be unique
/// among links and among joints.
pub fn export_robot<S: ObjectSource + ?Sized>(
    source: &S,
    links: &[RobotLinkSpec],
    joints: &[RobotJointSpec],
    options: &ExportOptions,
) -> Result<RobotExport, ExportError> {
    let mut robot =
        XmlElement::new("robot").with_attr("name", valid_urdf_name(&options.robot_name));
    let mut exporter = GeometryExporter::new(source, options);
    let mut records = Vec::new();
    let mut link_names = HashSet::new();

    for spec in links {
        let name = valid_urdf_name(&spec.name);
        if !link_names.insert(name.clone()) {
            return Err(ExportError::DuplicateLinkName(name));
        }

        let mut link = XmlElement::new("link").with_attr("name", name.as_str());
        if let Some(visual) = spec.visual {
            let visuals = exporter.visual(visual, spec.placement)?;
            push_records(&mut link, &mut records, visuals);
        }
        if let Some(collision) = spec.collision {
            let collisions = exporter.collision(collision, spec.placement)?;
            push_records(&mut link, &mut records, collisions);
        }
        tracing::debug!("Link \"{}\": {} elements", name, link.children.len());
        robot.push(link);
    }

    let mut joint_names = HashSet::new();
    for joint in joints {
        let name = valid_urdf_name(&joint.name);
        if !joint_names.insert(name.clone()) {
            return Err(ExportError::DuplicateJointName(name));
        }
        for end in [&joint.parent, &joint.child] {
            match end {
                Some(link) if !link_names.contains(&valid_urdf_name(link)) => {
                    tracing::warn!("Joint \"{}\" refers to unknown link \"{}\"", name, link);
                }
                None => tracing::warn!("Joint \"{}\" is not connected at both ends", name),
                Some(_) => {}
            }
        }
        robot.push(urdf_joint(joint));
    }

    tracing::info!(
        "Exported robot \"{}\": {} links, {} joints, {} geometry elements",
        options.robot_name,
        links.len(),
        joints.len(),
        records.len()
    );
    Ok(RobotExport {
        xml: robot,
        records,
        warnings: exporter.finish(),
    })
}

fn push_records(link: &mut XmlElement, records: &mut Vec<ExportRecord>, new: Vec<ExportRecord>) {
    for record in new {
        link.push(record.xml.clone());
        records.push(record);
    }
}
