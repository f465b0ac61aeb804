//! The query contract.
//!
//! Filters never build queries themselves. They take a query, apply
//! transforms to it and hand it back, so any builder that implements
//! [`SoftDeleteQuery`] can be filtered.

/// Id of the global scope that hides soft-deleted rows.
pub const SOFT_DELETING_SCOPE: &str = "soft_deleting";

/// A query over a model that supports soft deletes.
///
/// Every method consumes the query and returns the transformed one.
pub trait SoftDeleteQuery: Sized {
    /// Remove a global scope by id. Removing an absent scope does nothing.
    fn without_global_scope(self, scope: &str) -> Self;

    /// Include soft-deleted rows alongside live ones.
    fn with_trashed(self) -> Self;

    /// Only soft-deleted rows.
    fn only_trashed(self) -> Self;

    /// Only live rows.
    fn without_trashed(self) -> Self;
}
