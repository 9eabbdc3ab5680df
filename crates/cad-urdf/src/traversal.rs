//! Flattening of a group/part/link hierarchy into placed geometric leaves

use uuid::Uuid;

use crate::document::{CadObject, ObjectKind, ObjectSource};
use crate::placement::Placement;
use crate::shape::LeafShape;

/// A resolved geometric object with its accumulated placement
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLeaf {
    /// The leaf object (after link resolution)
    pub object: Uuid,
    /// Internal name of the leaf object
    pub name: String,
    /// Label of the leaf object
    pub label: String,
    /// Dot-terminated path of internal names from the root, e.g. `"Part.Link.Box."`
    pub sub_path: String,
    /// Placement of the leaf in the frame of `base`
    pub placement: Placement,
    pub shape: LeafShape,
}

/// Errors raised while walking the object tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraversalError {
    #[error("Object not found: {0}")]
    ObjectNotFound(Uuid),
    #[error("Cyclic reference through \"{0}\"")]
    Cycle(String),
}

/// Flatten `root` into its geometric leaves, depth-first, children in order
///
/// Every placement on the path from `root` (included) to each leaf (included)
/// is folded into [`SceneLeaf::placement`], with `base` pre-multiplied. A link
/// contributes its own placement; the placement of its target is applied on
/// top only when the link has `link_transform` set. Empty containers and
/// coordinate systems contribute no leaves.
pub fn flatten_leaves<S: ObjectSource + ?Sized>(
    source: &S,
    root: Uuid,
    base: Placement,
) -> Result<Vec<SceneLeaf>, TraversalError> {
    let mut walker = Walker {
        source,
        stack: Vec::new(),
        leaves: Vec::new(),
    };
    walker.visit(root, base, true, String::new())?;
    Ok(walker.leaves)
}

struct Walker<'a, S: ?Sized> {
    source: &'a S,
    /// Objects on the current path, for cycle detection
    stack: Vec<Uuid>,
    leaves: Vec<SceneLeaf>,
}

impl<S: ObjectSource + ?Sized> Walker<'_, S> {
    fn visit(
        &mut self,
        id: Uuid,
        accumulated: Placement,
        apply_own_placement: bool,
        sub_path: String,
    ) -> Result<(), TraversalError> {
        let source = self.source;
        let object = source
            .object(id)
            .ok_or(TraversalError::ObjectNotFound(id))?;
        if self.stack.contains(&id) {
            return Err(TraversalError::Cycle(object.label_or_name().to_string()));
        }

        let placement = match object.placement {
            Some(own) if apply_own_placement => accumulated * own,
            _ => accumulated,
        };

        self.stack.push(id);
        let result = self.visit_kind(object, placement, sub_path);
        self.stack.pop();
        result
    }

    fn visit_kind(
        &mut self,
        object: &CadObject,
        placement: Placement,
        sub_path: String,
    ) -> Result<(), TraversalError> {
        match &object.kind {
            ObjectKind::Group { children } | ObjectKind::Part { children } => {
                let source = self.source;
                for child_id in children {
                    let child = source
                        .object(*child_id)
                        .ok_or(TraversalError::ObjectNotFound(*child_id))?;
                    let child_path = format!("{sub_path}{}.", child.name);
                    self.visit(*child_id, placement, true, child_path)?;
                }
            }
            ObjectKind::Link {
                target,
                link_transform,
            } => {
                // The link stands in for its target: the path does not name the target
                self.visit(*target, placement, *link_transform, sub_path)?;
            }
            ObjectKind::CoordinateSystem => {
                tracing::debug!(
                    "Skipping coordinate system \"{}\" (no geometry)",
                    object.label_or_name()
                );
            }
            kind => {
                if let Some(shape) = kind.leaf_shape() {
                    self.leaves.push(SceneLeaf {
                        object: object.id,
                        name: object.name.clone(),
                        label: object.label.clone(),
                        sub_path,
                        placement,
                        shape,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Return a selection path without its last sub-element (face, edge, vertex)
///
/// - `"Face6"` -> `""`
/// - `"Body.Box001."` -> `"Body.Box001"`
/// - `"Body.Box001.Face6"` -> `"Body.Box001"`
pub fn strip_subelement(sub_fullpath: &str) -> &str {
    match sub_fullpath.rsplit_once('.') {
        Some((path, _)) => path,
        None => "",
    }
}

/// Global placement of the object designated by a selection path under `root`
///
/// `sub_fullpath` has the form `"name0.name1.Edge001"`: the last element is a
/// sub-element and is ignored; each name is looked up among the children (or
/// link target's children) of the previous object. Links are resolved the same
/// way as in [`flatten_leaves`]. Returns `None` if a name cannot be resolved.
pub fn global_placement<S: ObjectSource + ?Sized>(
    source: &S,
    root: Uuid,
    sub_fullpath: &str,
) -> Option<Placement> {
    let (object, frame) = resolve_selection(source, root, sub_fullpath)?;
    Some(frame * object.placement.unwrap_or(Placement::IDENTITY))
}

/// Object designated by a selection path under `root`, with the placement
/// of the frame it is placed in
///
/// The global placement of the object is the returned placement times its
/// own placement, see [`global_placement`].
pub fn resolve_selection<'a, S: ObjectSource + ?Sized>(
    source: &'a S,
    root: Uuid,
    sub_fullpath: &str,
) -> Option<(&'a CadObject, Placement)> {
    let mut current = source.object(root)?;
    let mut frame = Placement::IDENTITY;
    let path = strip_subelement(sub_fullpath);
    if path.is_empty() {
        return Some((current, frame));
    }
    for name in path.split('.') {
        if let Some(own) = current.placement {
            frame *= own;
        }
        let (container, extra) = resolve_link(source, current)?;
        frame *= extra;
        let children = container.kind.children()?;
        current = children
            .iter()
            .filter_map(|id| source.object(*id))
            .find(|child| child.name == name)?;
    }
    Some((current, frame))
}

/// Follow links until a non-link object, returning it with the placement of
/// the link targets that must be applied
fn resolve_link<'a, S: ObjectSource + ?Sized>(
    source: &'a S,
    object: &'a CadObject,
) -> Option<(&'a CadObject, Placement)> {
    let mut current = object;
    let mut extra = Placement::IDENTITY;
    let mut hops = Vec::new();
    while let ObjectKind::Link {
        target,
        link_transform,
    } = current.kind
    {
        if hops.contains(&target) {
            return None;
        }
        hops.push(target);
        let next = source.object(target)?;
        if link_transform && let Some(own) = next.placement {
            extra *= own;
        }
        current = next;
    }
    Some((current, extra))
}
