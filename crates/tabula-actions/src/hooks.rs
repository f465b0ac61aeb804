//! Lifecycle hooks for bulk actions.
//!
//! This module provides:
//! - `HookPoint` - The moments in the lifecycle a hook can attach to
//! - `HookContext` - What every hook receives
//! - `ActionHooks` - Per-action storage of hook chains
//!
//! ## Execution Order
//!
//! Hooks on the same point run in registration order. An action's own
//! hooks are registered when it is built; the registry's configure hook
//! runs afterwards, so cross-cutting hooks it adds run last.
//!
//! ## Hook Points
//!
//! ```text
//! mount:  before_form_filled → mount_using → after_form_filled
//! call:   before_form_validated → (validate) → after_form_validated
//!         → before_call → body → after_call
//! ```
//!
//! Form hooks only fire when the action has a form schema.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tabula_core::RecordSet;

use crate::action::BulkAction;
use crate::form::FormBinding;

/// Global counter for generating unique hook IDs.
static HOOK_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique hook ID.
fn generate_hook_id() -> String {
    let id = HOOK_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("hook:{}", id)
}

/// A point in the lifecycle where hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    BeforeFormFilled,
    AfterFormFilled,
    BeforeFormValidated,
    AfterFormValidated,
    BeforeCall,
}

/// Everything a hook gets to see.
pub struct HookContext<'a> {
    pub action: &'a BulkAction,
    pub form: &'a dyn FormBinding,
    pub records: &'a RecordSet,
}

/// A lifecycle hook.
pub type HookFn = Arc<dyn Fn(&HookContext<'_>) + Send + Sync>;

/// A registered hook entry.
pub struct HookEntry {
    /// Unique identifier for removal.
    pub id: String,

    pub function: HookFn,
}

impl std::fmt::Debug for HookEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookEntry").field("id", &self.id).finish()
    }
}

/// Hook chains for one action.
#[derive(Debug, Default)]
pub struct ActionHooks {
    hooks: RwLock<HashMap<HookPoint, Vec<HookEntry>>>,
}

impl ActionHooks {
    /// Create an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook at the given point.
    ///
    /// Returns the hook ID for later removal.
    pub fn add<F>(&self, point: HookPoint, hook: F) -> String
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        let id = generate_hook_id();
        let entry = HookEntry {
            id: id.clone(),
            function: Arc::new(hook),
        };
        self.hooks.write().entry(point).or_default().push(entry);
        tracing::debug!("Added {:?} hook (id: {})", point, id);
        id
    }

    /// Remove a hook by ID.
    ///
    /// Returns true if the hook was found and removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut hooks = self.hooks.write();
        for chain in hooks.values_mut() {
            if let Some(pos) = chain.iter().position(|h| h.id == id) {
                chain.remove(pos);
                tracing::debug!("Removed hook (id: {})", id);
                return true;
            }
        }
        false
    }

    /// Get the hook chain for a point, in execution order.
    pub fn get_chain(&self, point: HookPoint) -> Vec<HookFn> {
        self.hooks
            .read()
            .get(&point)
            .map(|chain| chain.iter().map(|h| h.function.clone()).collect())
            .unwrap_or_default()
    }

    /// Run every hook registered at `point`.
    ///
    /// The chain is copied out first so a hook may add or remove hooks
    /// without deadlocking.
    pub fn run(&self, point: HookPoint, ctx: &HookContext<'_>) {
        for hook in self.get_chain(point) {
            hook(ctx);
        }
    }

    /// Check if any hooks are registered at the point.
    pub fn has_hooks(&self, point: HookPoint) -> bool {
        self.hooks
            .read()
            .get(&point)
            .is_some_and(|chain| !chain.is_empty())
    }

    /// Total number of registered hooks.
    pub fn count(&self) -> usize {
        self.hooks.read().values().map(Vec::len).sum()
    }
}
