//! The table an action registry belongs to.

use std::sync::Arc;

use tabula_core::{Record, RecordId, RecordSet};

/// Turns selected identifiers into records.
#[cfg_attr(test, mockall::automock)]
pub trait RecordResolver: Send + Sync {
    /// Resolve `ids`. Unknown identifiers are skipped.
    fn resolve(&self, ids: &[RecordId]) -> RecordSet;
}

/// Resolver over a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    records: Vec<Record>,
}

impl StaticRecords {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordResolver for StaticRecords {
    fn resolve(&self, ids: &[RecordId]) -> RecordSet {
        self.records
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect()
    }
}

/// Identity and data access for one table.
pub struct TableContext {
    /// Unique table id, used to name the confirmation surface.
    pub id: String,

    /// Model type the table lists. Passed to form providers.
    pub model: String,

    resolver: Arc<dyn RecordResolver>,
}

impl TableContext {
    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        resolver: Arc<dyn RecordResolver>,
    ) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            resolver,
        }
    }

    /// Create a table with a generated id.
    pub fn anonymous(model: impl Into<String>, resolver: Arc<dyn RecordResolver>) -> Self {
        let id = format!("table-{}", uuid::Uuid::new_v4());
        Self::new(id, model, resolver)
    }

    /// Resolve records for the given ids.
    pub fn records(&self, ids: &[RecordId]) -> RecordSet {
        if ids.is_empty() {
            return RecordSet::new();
        }
        self.resolver.resolve(ids)
    }
}

impl std::fmt::Debug for TableContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableContext")
            .field("id", &self.id)
            .field("model", &self.model)
            .finish()
    }
}
