//! Selected record tracking.

use parking_lot::RwLock;
use std::collections::BTreeSet;

use tabula_core::RecordId;

/// The set of records currently selected in a table.
///
/// Order carries no meaning; snapshots come out sorted so they are stable
/// to compare and log.
#[derive(Debug, Default)]
pub struct SelectionContext {
    ids: RwLock<BTreeSet<RecordId>>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record. Returns false if it was already selected.
    pub fn select(&self, id: impl Into<RecordId>) -> bool {
        self.ids.write().insert(id.into())
    }

    /// Remove one record. Returns false if it was not selected.
    pub fn deselect(&self, id: &RecordId) -> bool {
        self.ids.write().remove(id)
    }

    /// Flip one record's selection. Returns whether it is now selected.
    pub fn toggle(&self, id: impl Into<RecordId>) -> bool {
        let id = id.into();
        let mut ids = self.ids.write();
        if ids.remove(&id) {
            false
        } else {
            ids.insert(id);
            true
        }
    }

    /// Add every given record to the selection.
    pub fn select_all<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecordId>,
    {
        self.ids.write().extend(ids.into_iter().map(Into::into));
    }

    /// Make the given records the whole selection.
    pub fn replace<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecordId>,
    {
        let next: BTreeSet<RecordId> = ids.into_iter().map(Into::into).collect();
        *self.ids.write() = next;
    }

    pub fn clear(&self) {
        self.ids.write().clear();
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.read().contains(id)
    }

    /// Sorted copy of the selected ids.
    pub fn snapshot(&self) -> Vec<RecordId> {
        self.ids.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}
