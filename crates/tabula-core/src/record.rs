//! Record and RecordId types for table rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Stable record identifier (the table's primary key, stringified).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(key: u64) -> Self {
        Self(key.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single table row.
///
/// Attributes are kept as an arbitrary JSON object so the core never has to
/// know the shape of the underlying model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Primary key.
    pub id: RecordId,

    /// Column values keyed by column name.
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Create a record with no attributes.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            attributes: serde_json::Map::new(),
        }
    }

    /// Set an attribute, builder style.
    pub fn with(mut self, column: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(column.into(), value);
        self
    }

    /// Read an attribute.
    pub fn get(&self, column: &str) -> Option<&serde_json::Value> {
        self.attributes.get(column)
    }

    /// Whether the soft-delete column holds a non-null value.
    pub fn is_trashed(&self, deleted_at_column: &str) -> bool {
        matches!(self.get(deleted_at_column), Some(v) if !v.is_null())
    }
}

/// Records resolved for a selection, in resolver order.
pub type RecordSet = Vec<Record>;
