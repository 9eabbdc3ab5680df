//! Export options for URDF generation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MESH_DIR, DEFAULT_MESH_EXTENSION, FALLBACK_PACKAGE_NAME};

use super::joint::RobotJointSpec;

/// Export options for URDF generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// ROS package holding the meshes (`package://<name>/...`)
    pub package_name: Option<String>,
    /// Extension of referenced mesh files, without the dot
    pub mesh_extension: String,
    /// Mesh directory inside the package
    pub mesh_dir: String,
    /// Package name used when a mesh is found but `package_name` is unset
    pub fallback_package_name: String,
    /// Robot name (for URDF root element)
    pub robot_name: String,
    /// Joints written after the links
    pub joints: Vec<RobotJointSpec>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            package_name: None,
            mesh_extension: DEFAULT_MESH_EXTENSION.to_string(),
            mesh_dir: DEFAULT_MESH_DIR.to_string(),
            fallback_package_name: FALLBACK_PACKAGE_NAME.to_string(),
            robot_name: "robot".to_string(),
            joints: Vec::new(),
        }
    }
}

impl ExportOptions {
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Package name if set and not empty
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Load options from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| OptionsError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Parse options from RON text; missing fields take their default value
    pub fn from_ron_str(content: &str) -> Result<Self, OptionsError> {
        ron::from_str(content).map_err(|e| OptionsError::Parse(e.to_string()))
    }
}

/// Option loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid export options: {0}")]
    Parse(String),
}
