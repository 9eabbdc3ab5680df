//! CAD document snapshot
//!
//! The export pipeline never talks to a live CAD application. It reads objects
//! through [`ObjectSource`], implemented here by [`CadDocument`], a serializable
//! snapshot of the document taken at export time.

mod bounds;
mod object;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bounds::BoundBox;
pub use object::{CadObject, ObjectKind};

/// Read access to the objects of a CAD document
pub trait ObjectSource {
    /// Get an object by ID
    fn object(&self, id: Uuid) -> Option<&CadObject>;
}

/// Serialization format for backward compatibility
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentData {
    version: u32,
    name: String,
    objects: Vec<CadObject>,
    roots: Vec<Uuid>,
}

/// Snapshot of a CAD document
#[derive(Debug, Clone)]
pub struct CadDocument {
    /// File format version
    pub version: u32,
    /// Document name
    pub name: String,
    /// All objects (keyed by ID for O(1) lookup)
    objects: HashMap<Uuid, CadObject>,
    /// Top-level objects, in tree order
    roots: Vec<Uuid>,
}

impl From<DocumentData> for CadDocument {
    fn from(data: DocumentData) -> Self {
        Self {
            version: data.version,
            name: data.name,
            objects: data.objects.into_iter().map(|o| (o.id, o)).collect(),
            roots: data.roots,
        }
    }
}

impl Serialize for CadDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Sorted by name so that saved files are stable
        let mut objects: Vec<CadObject> = self.objects.values().cloned().collect();
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        let data = DocumentData {
            version: self.version,
            name: self.name.clone(),
            objects,
            roots: self.roots.clone(),
        };
        data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CadDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = DocumentData::deserialize(deserializer)?;
        Ok(CadDocument::from(data))
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

impl ObjectSource for CadDocument {
    fn object(&self, id: Uuid) -> Option<&CadObject> {
        self.objects.get(&id)
    }
}

impl CadDocument {
    /// Create a new empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            objects: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Save document to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| DocumentError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load document from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DocumentError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| DocumentError::Deserialize(e.to_string()))
    }

    /// Load document from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, DocumentError> {
        let content =
            std::str::from_utf8(data).map_err(|e| DocumentError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| DocumentError::Deserialize(e.to_string()))
    }

    // ============== Object Accessors ==============

    /// Add an object that is owned by a container or referenced by a link
    pub fn add_object(&mut self, object: CadObject) -> Uuid {
        let id = object.id;
        self.objects.insert(id, object);
        id
    }

    /// Add a top-level object
    pub fn add_root(&mut self, object: CadObject) -> Uuid {
        let id = self.add_object(object);
        self.roots.push(id);
        id
    }

    /// Top-level objects, in tree order
    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    /// Get an object by ID
    pub fn get(&self, id: Uuid) -> Option<&CadObject> {
        self.objects.get(&id)
    }

    /// Get an object by its internal name
    pub fn get_by_name(&self, name: &str) -> Option<&CadObject> {
        self.objects.values().find(|o| o.name == name)
    }

    /// Iterate over all objects
    pub fn objects(&self) -> impl Iterator<Item = &CadObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Document-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use glam::{DQuat, DVec3};

    use super::*;
    use crate::placement::Placement;

    fn sample_document() -> CadDocument {
        let mut doc = CadDocument::new("robot");
        let box_id = doc.add_object(
            CadObject::new_box("Box", 20.0, 30.0, 40.0)
                .with_label("Base plate")
                .with_placement(Placement::new(
                    DVec3::new(1.0, 2.0, 3.0),
                    DQuat::from_rotation_z(0.5),
                )),
        );
        let sphere_id = doc.add_object(CadObject::new_sphere("Sphere", 5.0));
        doc.add_root(CadObject::new_part("Part", vec![box_id, sphere_id]));
        doc
    }

    #[test]
    fn test_add_and_get() {
        let doc = sample_document();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.roots().len(), 1);
        let part = doc.get(doc.roots()[0]).unwrap();
        assert!(part.is_part());
        assert_eq!(part.kind.children().unwrap().len(), 2);
        assert_eq!(doc.get_by_name("Box").unwrap().label, "Base plate");
        assert!(doc.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_bytes_round_trip() {
        let doc = sample_document();
        let bytes = doc.to_bytes().unwrap();
        let loaded = CadDocument::load_from_bytes(&bytes).unwrap();
        assert_eq!(loaded.name, "robot");
        assert_eq!(loaded.roots(), doc.roots());
        for object in doc.objects() {
            assert_eq!(loaded.get(object.id), Some(object));
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("robot.ron");
        let doc = sample_document();
        doc.save(&path).unwrap();
        let loaded = CadDocument::load(&path).unwrap();
        assert_eq!(loaded.len(), doc.len());
    }

    #[test]
    fn test_load_invalid() {
        let result = CadDocument::load_from_bytes(b"not a document");
        assert!(matches!(result, Err(DocumentError::Deserialize(_))));
        let result = CadDocument::load("/nonexistent/robot.ron");
        assert!(matches!(result, Err(DocumentError::Io(_))));
    }
}
