//! Bulk actions for tabula data tables.
//!
//! This crate provides the bulk action system including:
//! - Action descriptors with forms, predicates and lifecycle hooks
//! - A per-table registry that builds and caches actions
//! - The mount / call / cancel lifecycle with observable mount state
//! - UI signals for opening and closing the confirmation surface

pub mod action;
pub mod error;
pub mod form;
pub mod hooks;
pub mod lifecycle;
pub mod registry;
pub mod selection;
pub mod signals;
pub mod table;

// Re-export commonly used types
pub use action::{ActionBody, ActionInvocation, ActionPredicate, AfterCallFn, BulkAction, MountFn};
pub use error::{ActionError, Halt, LifecycleError, LifecycleResult, RegistryError};
pub use form::{
    FormBinding, FormData, FormField, FormProvider, FormState, SchemaForm, SchemaFormProvider,
    ValidationErrors,
};
pub use hooks::{ActionHooks, HookContext, HookEntry, HookFn, HookPoint};
pub use lifecycle::{
    BulkActionLifecycle, CallOutcome, MountOutcome, MountSnapshot, ObservableMount, Phase,
};
pub use registry::{ActionFactory, ActionMap, ActionRegistry, ConfigureFn};
pub use selection::SelectionContext;
pub use signals::SignalQueue;
pub use table::{RecordResolver, StaticRecords, TableContext};

// Re-export tabula_core types for convenience
pub use tabula_core::{ActionsConfig, Record, RecordId, RecordSet, UiSignal};
