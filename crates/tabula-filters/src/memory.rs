//! In-memory soft-delete query.
//!
//! Behaves like a soft-deleting model query: the soft-deleting global scope
//! is on until removed, and the trashed transforms strip it before adding
//! their own constraint.

use std::collections::BTreeSet;

use tabula_core::Record;

use crate::query::{SoftDeleteQuery, SOFT_DELETING_SCOPE};

/// Default soft-delete column.
pub const DELETED_AT: &str = "deleted_at";

/// A `where` clause on the soft-delete column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Null,
    NotNull,
}

/// A query over a fixed list of records.
#[derive(Debug, Clone)]
pub struct MemoryQuery {
    records: Vec<Record>,
    deleted_at: String,
    scopes: BTreeSet<String>,
    wheres: Vec<Constraint>,
}

impl MemoryQuery {
    /// Query `records` with the soft-deleting scope applied.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            deleted_at: DELETED_AT.to_string(),
            scopes: BTreeSet::from([SOFT_DELETING_SCOPE.to_string()]),
            wheres: Vec::new(),
        }
    }

    /// Use a different soft-delete column.
    pub fn deleted_at_column(mut self, column: impl Into<String>) -> Self {
        self.deleted_at = column.into();
        self
    }

    pub fn where_null(mut self) -> Self {
        self.wheres.push(Constraint::Null);
        self
    }

    pub fn where_not_null(mut self) -> Self {
        self.wheres.push(Constraint::NotNull);
        self
    }

    pub fn has_global_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.wheres
    }

    /// Run the query. Records keep their original order.
    pub fn get(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.records.iter().filter(|r| self.matches(r)).count()
    }

    fn matches(&self, record: &Record) -> bool {
        let trashed = record.is_trashed(&self.deleted_at);
        if self.has_global_scope(SOFT_DELETING_SCOPE) && trashed {
            return false;
        }
        self.wheres.iter().all(|constraint| match constraint {
            Constraint::Null => !trashed,
            Constraint::NotNull => trashed,
        })
    }
}

impl SoftDeleteQuery for MemoryQuery {
    fn without_global_scope(mut self, scope: &str) -> Self {
        self.scopes.remove(scope);
        self
    }

    fn with_trashed(self) -> Self {
        self.without_global_scope(SOFT_DELETING_SCOPE)
    }

    fn only_trashed(self) -> Self {
        self.without_global_scope(SOFT_DELETING_SCOPE).where_not_null()
    }

    fn without_trashed(self) -> Self {
        self.without_global_scope(SOFT_DELETING_SCOPE).where_null()
    }
}
