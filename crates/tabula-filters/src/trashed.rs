//! The trashed filter.
//!
//! | State | Rows                |
//! |-------|---------------------|
//! | true  | live and deleted    |
//! | false | deleted only        |
//! | blank | live only (default) |
//!
//! The base query always drops the soft-deleting global scope so the state
//! alone decides which rows are visible.

use tabula_core::TrashedLabels;

use crate::query::{SoftDeleteQuery, SOFT_DELETING_SCOPE};
use crate::ternary::TernaryFilter;

/// Default name of the trashed filter.
pub const TRASHED_FILTER_NAME: &str = "trashed";

/// A [`TernaryFilter`] over soft-deleted rows.
pub type TrashedFilter<Q> = TernaryFilter<Q>;

impl<Q: SoftDeleteQuery + 'static> TernaryFilter<Q> {
    /// Trashed filter named `"trashed"` with the given labels.
    pub fn trashed(labels: &TrashedLabels) -> Self {
        Self::trashed_named(TRASHED_FILTER_NAME, labels)
    }

    /// Trashed filter under a custom name.
    pub fn trashed_named(name: impl Into<String>, labels: &TrashedLabels) -> Self {
        TernaryFilter::new(name)
            .label(labels.label.clone())
            .placeholder(labels.placeholder.clone())
            .true_label(labels.true_label.clone())
            .false_label(labels.false_label.clone())
            .queries(
                |query: Q| query.with_trashed(),
                |query: Q| query.only_trashed(),
                |query: Q| query.without_trashed(),
            )
            .base_query(|query: Q| query.without_global_scope(SOFT_DELETING_SCOPE))
    }
}
