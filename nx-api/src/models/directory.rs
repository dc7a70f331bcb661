//! Directory entity models.
//!
//! Directories are flat vocabularies; entries are not further navigable,
//! so no client back-reference is carried.

use serde::{Deserialize, Serialize};

/// One entry of a server directory (vocabulary).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Wire entity type discriminator ("directoryEntry").
    #[serde(rename = "entity-type", default)]
    pub entity_type: String,

    /// Name of the directory this entry belongs to.
    #[serde(rename = "directoryName", default)]
    pub directory_name: String,

    /// Entry identifier within the directory.
    #[serde(default)]
    pub id: String,

    /// Dynamic entry properties (label, ordering, obsolete flag, ...).
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// An ordered set of directory entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySet {
    /// The entries of the directory.
    #[serde(default)]
    pub entries: Vec<DirectoryEntry>,
}

impl DirectorySet {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
