//! Core types for tabula data tables.
//!
//! This crate contains shared data structures used across all tabula crates:
//! - Record and RecordId types for table rows
//! - Ternary filter state
//! - Signals for the presentation layer
//! - Configuration types
//! - Error types

mod config;
mod error;
mod record;
mod signal;
mod ternary;

pub use config::{
    config_dir, config_path, ensure_config_dir, ActionsConfig, FiltersConfig, TableConfig,
    TrashedLabels,
};
pub use error::ConfigError;
pub use record::{Record, RecordId, RecordSet};
pub use signal::UiSignal;
pub use ternary::TernaryValue;
