//! Global constants for cad-urdf

/// Small number to test whether a value is close to zero (4 * f64 machine epsilon)
pub const EPS: f64 = f64::EPSILON * 4.0;

/// Millimeters per meter (CAD host lengths are in mm, URDF lengths in m)
pub const MM_PER_M: f64 = 1000.0;

/// Significant digits used for `<origin xyz="...">`
pub const ORIGIN_SIGNIFICANT_DIGITS: usize = 6;

/// Default extension for exported mesh files (without the dot)
pub const DEFAULT_MESH_EXTENSION: &str = "dae";

/// Default mesh directory inside the ROS package
pub const DEFAULT_MESH_DIR: &str = "meshes";

/// Package name substituted when a mesh is found but no package name was given
pub const FALLBACK_PACKAGE_NAME: &str = "package";

/// Name used for URDF elements whose source label is empty
pub const EMPTY_URDF_NAME: &str = "no_label";

/// Convert a host length (mm) to a URDF length (m)
pub fn mm_to_m(value: f64) -> f64 {
    value / MM_PER_M
}

/// `<parent link>` of a joint without parent link
pub const NO_PARENT_DEFINED: &str = "NO_PARENT_DEFINED";

/// `<child link>` of a joint without child link
pub const NO_CHILD_DEFINED: &str = "NO_CHILD_DEFINED";
