//! Validation of joint groups: groups of links to coordinate systems or
//! sub-assemblies marking where joints attach

use uuid::Uuid;

use crate::document::{CadObject, ObjectSource};

use super::{ExportError, ExportWarning};

/// What a joint anchor link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// A local coordinate system, i.e. a joint frame
    CoordinateSystem,
    /// A part, i.e. the assembly giving the relative link poses
    SubAssembly,
}

/// A conforming child of a joint group
#[derive(Debug, Clone, PartialEq)]
pub struct JointAnchor {
    /// The link child of the group
    pub link: Uuid,
    /// Object the link points to
    pub target: Uuid,
    pub kind: AnchorKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupValidation {
    /// Conforming children, in group order
    pub anchors: Vec<JointAnchor>,
    /// One warning per skipped child
    pub warnings: Vec<ExportWarning>,
}

/// Validate a group made of links to coordinate systems and sub-assemblies
///
/// Fails if `group` is not a group. Children that are not links, or whose
/// target is neither a coordinate system nor a part, are skipped with a
/// warning.
pub fn export_group_with_lcs<S: ObjectSource + ?Sized>(
    source: &S,
    group: Uuid,
) -> Result<GroupValidation, ExportError> {
    let group = source
        .object(group)
        .ok_or(ExportError::ObjectNotFound(group))?;
    if !group.is_group() {
        return Err(ExportError::NotAGroup(group.label_or_name().to_string()));
    }

    let mut validation = GroupValidation::default();
    for child_id in group.kind.children().unwrap_or_default() {
        let child = source
            .object(*child_id)
            .ok_or(ExportError::ObjectNotFound(*child_id))?;
        match anchor_of(source, child) {
            Ok(anchor) => validation.anchors.push(anchor),
            Err(warning) => {
                tracing::warn!("{}", warning);
                validation.warnings.push(warning);
            }
        }
    }
    Ok(validation)
}

fn anchor_of<S: ObjectSource + ?Sized>(
    source: &S,
    child: &CadObject,
) -> Result<JointAnchor, ExportWarning> {
    let label = || child.label_or_name().to_string();
    let target_id = child
        .linked_object()
        .ok_or_else(|| ExportWarning::NotALink { label: label() })?;
    let target = source
        .object(target_id)
        .ok_or_else(|| ExportWarning::UnsupportedLinkTarget { label: label() })?;

    let kind = if target.is_lcs() {
        AnchorKind::CoordinateSystem
    } else if target.is_part() {
        AnchorKind::SubAssembly
    } else {
        return Err(ExportWarning::UnsupportedLinkTarget { label: label() });
    };
    Ok(JointAnchor {
        link: child.id,
        target: target_id,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CadDocument, ObjectKind};

    #[test]
    fn test_conforming_group() {
        let mut doc = CadDocument::new("doc");
        let lcs = doc.add_object(CadObject::new("LCS", ObjectKind::CoordinateSystem));
        let assembly = doc.add_object(CadObject::new_part("Assembly", Vec::new()));
        let l1 = doc.add_object(CadObject::new_link("Joint1", lcs));
        let l2 = doc.add_object(CadObject::new_link("Robot", assembly));
        let group = doc.add_root(CadObject::new_group("Joints", vec![l1, l2]));

        let validation = export_group_with_lcs(&doc, group).unwrap();
        assert!(validation.warnings.is_empty());
        assert_eq!(
            validation.anchors,
            [
                JointAnchor {
                    link: l1,
                    target: lcs,
                    kind: AnchorKind::CoordinateSystem
                },
                JointAnchor {
                    link: l2,
                    target: assembly,
                    kind: AnchorKind::SubAssembly
                },
            ]
        );
    }

    #[test]
    fn test_non_conforming_children_are_skipped() {
        let mut doc = CadDocument::new("doc");
        let lcs = doc.add_object(CadObject::new("LCS", ObjectKind::CoordinateSystem));
        let cube = doc.add_object(CadObject::new_box("Cube", 1.0, 1.0, 1.0));
        let not_a_link = doc.add_object(CadObject::new_box("Loose box", 1.0, 1.0, 1.0));
        let to_cube = doc.add_object(CadObject::new_link("ToCube", cube));
        let to_lcs = doc.add_object(CadObject::new_link("ToLcs", lcs));
        let group = doc.add_root(CadObject::new_group("Joints", vec![not_a_link, to_cube, to_lcs]));

        let validation = export_group_with_lcs(&doc, group).unwrap();
        assert_eq!(validation.anchors.len(), 1);
        assert_eq!(validation.anchors[0].link, to_lcs);
        assert_eq!(
            validation.warnings,
            [
                ExportWarning::NotALink {
                    label: "Loose box".to_string()
                },
                ExportWarning::UnsupportedLinkTarget {
                    label: "ToCube".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_not_a_group() {
        let mut doc = CadDocument::new("doc");
        let part = doc.add_root(CadObject::new_part("Part", Vec::new()));
        assert_eq!(
            export_group_with_lcs(&doc, part),
            Err(ExportError::NotAGroup("Part".to_string()))
        );
        let missing = Uuid::new_v4();
        assert_eq!(
            export_group_with_lcs(&doc, missing),
            Err(ExportError::ObjectNotFound(missing))
        );
    }
}
