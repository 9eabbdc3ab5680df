//! `<joint>` elements connecting the links of a robot

use serde::{Deserialize, Serialize};

use crate::constants::{NO_CHILD_DEFINED, NO_PARENT_DEFINED};
use crate::placement::Placement;

use super::elements::urdf_origin_from_placement;
use super::format::format_float;
use super::xml::{XmlElement, valid_urdf_name};

/// Kinematic type of a joint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    #[default]
    Fixed,
    Prismatic,
    Revolute,
    Continuous,
    Planar,
    Floating,
}

impl JointType {
    /// Value of the `type` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            JointType::Fixed => "fixed",
            JointType::Prismatic => "prismatic",
            JointType::Revolute => "revolute",
            JointType::Continuous => "continuous",
            JointType::Planar => "planar",
            JointType::Floating => "floating",
        }
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URDF joint between two links
///
/// The joint moves along or about the z axis of its origin. Limits are in
/// m or rad, effort in N (or N.m) and velocity in m/s (or rad/s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotJointSpec {
    pub name: String,
    pub joint_type: JointType,
    /// Name of the parent link
    pub parent: Option<String>,
    /// Name of the child link
    pub child: Option<String>,
    /// Joint frame relative to the parent link, in mm
    pub origin: Placement,
    pub lower: f64,
    pub upper: f64,
    pub effort: f64,
    pub velocity: f64,
}

impl Default for RobotJointSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            joint_type: JointType::Fixed,
            parent: None,
            child: None,
            origin: Placement::IDENTITY,
            lower: 0.0,
            upper: 0.0,
            effort: 0.0,
            velocity: 0.0,
        }
    }
}

impl RobotJointSpec {
    pub fn new(name: impl Into<String>, joint_type: JointType) -> Self {
        Self {
            name: name.into(),
            joint_type,
            ..Default::default()
        }
    }

    pub fn with_links(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self.child = Some(child.into());
        self
    }

    pub fn with_origin(mut self, origin: Placement) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_limits(mut self, lower: f64, upper: f64, effort: f64, velocity: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self.effort = effort;
        self.velocity = velocity;
        self
    }
}

/// `<joint name type>` with its parent, child, origin, axis and limit
pub fn urdf_joint(joint: &RobotJointSpec) -> XmlElement {
    let parent = joint
        .parent
        .as_deref()
        .map_or_else(|| NO_PARENT_DEFINED.to_string(), valid_urdf_name);
    let child = joint
        .child
        .as_deref()
        .map_or_else(|| NO_CHILD_DEFINED.to_string(), valid_urdf_name);
    XmlElement::new("joint")
        .with_attr("name", valid_urdf_name(&joint.name))
        .with_attr("type", joint.joint_type.as_str())
        .with_child(XmlElement::new("parent").with_attr("link", parent))
        .with_child(XmlElement::new("child").with_attr("link", child))
        .with_child(urdf_origin_from_placement(&joint.origin))
        .with_child(XmlElement::new("axis").with_attr("xyz", "0 0 1"))
        .with_child(
            XmlElement::new("limit")
                .with_attr("lower", format_float(joint.lower))
                .with_attr("upper", format_float(joint.upper))
                .with_attr("effort", format_float(joint.effort))
                .with_attr("velocity", format_float(joint.velocity)),
        )
}
