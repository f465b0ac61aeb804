//! Query filters for tabula data tables.
//!
//! This crate provides:
//! - The soft-delete query contract filters are written against
//! - A generic three-state filter
//! - The trashed filter preset
//! - An in-memory query for tests and demos

pub mod memory;
pub mod query;
pub mod ternary;
pub mod trashed;

pub use memory::{Constraint, MemoryQuery, DELETED_AT};
pub use query::{SoftDeleteQuery, SOFT_DELETING_SCOPE};
pub use ternary::{QueryFn, TernaryFilter};
pub use trashed::{TrashedFilter, TRASHED_FILTER_NAME};

// Re-export tabula_core types for convenience
pub use tabula_core::{TernaryValue, TrashedLabels};
