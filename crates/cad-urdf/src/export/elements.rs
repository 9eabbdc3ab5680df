//! Builders for the `<origin>` and `<geometry>` URDF elements

use crate::constants::DEFAULT_MESH_DIR;
use crate::placement::Placement;

use super::format::{format_float, format_significant, format_triplet};
use super::xml::XmlElement;

/// `<origin xyz rpy>` of a placement
///
/// The translation is converted to meters and written with six significant
/// digits; the rotation is written as roll-pitch-yaw.
pub fn urdf_origin_from_placement(placement: &Placement) -> XmlElement {
    // Adding 0.0 turns -0.0 into 0.0
    let xyz = placement.base_m().map(|v| v + 0.0);
    let rpy = placement.rpy().map(|v| v + 0.0);
    XmlElement::new("origin")
        .with_attr("xyz", format_triplet(xyz, format_significant))
        .with_attr("rpy", format_triplet(rpy, format_float))
}

/// `<geometry><box size/></geometry>`, lengths in meters
pub fn urdf_geometry_box(length_x: f64, length_y: f64, length_z: f64) -> XmlElement {
    let size = format_triplet([length_x, length_y, length_z], format_float);
    XmlElement::new("geometry").with_child(XmlElement::new("box").with_attr("size", size))
}

/// `<geometry><sphere radius/></geometry>`, radius in meters
pub fn urdf_geometry_sphere(radius: f64) -> XmlElement {
    XmlElement::new("geometry")
        .with_child(XmlElement::new("sphere").with_attr("radius", format_float(radius)))
}

/// `<geometry><cylinder radius length/></geometry>`, lengths in meters
pub fn urdf_geometry_cylinder(radius: f64, length: f64) -> XmlElement {
    XmlElement::new("geometry").with_child(
        XmlElement::new("cylinder")
            .with_attr("radius", format_float(radius))
            .with_attr("length", format_float(length)),
    )
}

/// `<geometry><mesh filename/></geometry>` referencing
/// `package://{package_name}/meshes/{mesh_name}`
pub fn urdf_geometry_mesh(mesh_name: &str, package_name: &str) -> XmlElement {
    urdf_geometry_mesh_uri(&mesh_uri(package_name, DEFAULT_MESH_DIR, mesh_name))
}

pub(crate) fn urdf_geometry_mesh_uri(uri: &str) -> XmlElement {
    XmlElement::new("geometry").with_child(XmlElement::new("mesh").with_attr("filename", uri))
}

/// ROS package URI of a mesh file
pub fn mesh_uri(package_name: &str, mesh_dir: &str, mesh_name: &str) -> String {
    let mesh_dir = mesh_dir.trim_matches('/');
    if mesh_dir.is_empty() {
        format!("package://{package_name}/{mesh_name}")
    } else {
        format!("package://{package_name}/{mesh_dir}/{mesh_name}")
    }
}
