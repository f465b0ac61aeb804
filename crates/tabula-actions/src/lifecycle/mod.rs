//! Bulk Action Lifecycle
//!
//! Drives a bulk action from mount to reset.
//!
//! ## Flow
//!
//! ```text
//!   mount(name, ids)
//!        │
//!        ▼
//!  ┌─────────────┐  unknown / disabled
//!  │  resolve    │ ─────────────────────► Ignored (previous mount reset)
//!  └─────┬───────┘
//!        ▼
//!   Mounting: before_form_filled → mount_using → after_form_filled
//!        │
//!   ┌────┴──────────────┐
//!   │ no modal          │ modal
//!   ▼                   ▼
//! call() inline     AwaitingConfirmation ── cancel() ──► Idle
//!                       │
//!                    call(args)
//!                       │  validation error ──► stays AwaitingConfirmation
//!                       ▼
//!                    Calling ── Hold ──► AwaitingConfirmation (mount kept)
//!                       │
//!                       ▼
//!               after_call, reset ──► Idle
//! ```
//!
//! Reset (clear mount, selection, form data, cached form; close the
//! confirmation surface) runs on every exit from `Calling` except Hold,
//! including failures and panics in the body. A panic in a mount hook
//! resets too.

mod observable_mount;

pub use observable_mount::{MountSnapshot, ObservableMount, Phase};

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

use tabula_core::{ActionsConfig, RecordId, UiSignal};

use crate::action::{ActionInvocation, BulkAction};
use crate::error::{Halt, LifecycleResult};
use crate::form::{FormBinding, FormData, FormProvider, FormState, SchemaFormProvider};
use crate::hooks::{HookContext, HookPoint};
use crate::registry::{ActionMap, ActionRegistry};
use crate::selection::SelectionContext;
use crate::signals::SignalQueue;
use crate::table::TableContext;

// =============================================================================
// Outcomes
// =============================================================================

/// Result of [`BulkActionLifecycle::mount`].
#[derive(Debug, Clone, PartialEq)]
pub enum MountOutcome {
    /// The action was unknown, hidden or disabled. Nothing was mounted and
    /// any previous mount was reset.
    Ignored,

    /// The confirmation surface was opened; waiting for `call` or `cancel`.
    AwaitingConfirmation,

    /// The action needed no confirmation and was called straight away.
    Called(CallOutcome),
}

/// Result of [`BulkActionLifecycle::call`].
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// No mounted, enabled action to call.
    Skipped,

    /// The action ran. Holds the after-call value if one was given,
    /// otherwise the body's value.
    Completed(Value),

    /// The body asked to be held. The mount is still in place.
    Held,
}

// =============================================================================
// Lifecycle
// =============================================================================

/// The bulk action state machine for one table session.
pub struct BulkActionLifecycle {
    table: Arc<TableContext>,
    registry: ActionRegistry,
    selection: SelectionContext,
    mount: ObservableMount,
    form_state: FormState,
    forms: Arc<dyn FormProvider>,

    /// Form built for the current mount, dropped on reset.
    cached_form: Mutex<Option<Arc<dyn FormBinding>>>,

    signals: SignalQueue,
    config: ActionsConfig,
}

impl BulkActionLifecycle {
    /// Create a lifecycle and build the registry's cache for `table`.
    pub fn new(
        table: Arc<TableContext>,
        registry: ActionRegistry,
        config: ActionsConfig,
    ) -> LifecycleResult<Self> {
        let registry = if config.strict_names {
            registry.strict_names(true)
        } else {
            registry
        };
        registry.cache(&table)?;

        Ok(Self {
            form_state: FormState::new(config.form_state_path.clone()),
            table,
            registry,
            selection: SelectionContext::new(),
            mount: ObservableMount::new(),
            forms: Arc::new(SchemaFormProvider),
            cached_form: Mutex::new(None),
            signals: SignalQueue::new(),
            config,
        })
    }

    /// Use a different form provider.
    pub fn with_form_provider(mut self, provider: Arc<dyn FormProvider>) -> Self {
        self.forms = provider;
        self
    }

    /// Rebuild the action cache after the table's configuration changed.
    ///
    /// A mounted action keeps its name; the next lookup resolves it against
    /// the rebuilt actions.
    pub fn reload(&self) -> LifecycleResult<ActionMap> {
        Ok(self.registry.cache(&self.table)?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn table(&self) -> &Arc<TableContext> {
        &self.table
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Visible actions for the current context.
    pub fn actions(&self) -> ActionMap {
        self.registry.list()
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }

    pub fn signals(&self) -> &SignalQueue {
        &self.signals
    }

    /// Take every queued UI signal.
    pub fn drain_signals(&self) -> Vec<UiSignal> {
        self.signals.drain()
    }

    /// Subscribe to mount changes.
    pub fn subscribe(&self) -> watch::Receiver<MountSnapshot> {
        self.mount.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.mount.phase()
    }

    /// Name of the mounted action.
    pub fn mounted_action_name(&self) -> Option<String> {
        self.mount.mounted()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.mounted().is_some()
    }

    /// The mounted action, resolved against the visible actions with the
    /// current selection bound.
    pub fn mounted_action(&self) -> Option<Arc<BulkAction>> {
        let name = self.mount.mounted()?;
        self.registry.get(&name, &self.selection)
    }

    /// Current form input of the mount.
    pub fn form_data(&self) -> FormData {
        self.form_state.snapshot()
    }

    pub fn form_state(&self) -> &FormState {
        &self.form_state
    }

    /// Set one form input, as the user typing into the confirmation surface would.
    pub fn set_form_value(&self, field: impl Into<String>, value: Value) {
        self.form_state.set(field, value);
    }

    /// Id of the confirmation surface for this table.
    pub fn confirmation_id(&self) -> String {
        format!("{}{}", self.table.id, self.config.confirmation_suffix)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Mount the action `name` against `selected`.
    ///
    /// The selection is replaced first, so the action's predicates see it.
    /// Unknown, hidden and disabled actions are ignored without error, and
    /// any existing mount is reset: it must not run against the new selection.
    pub fn mount<I>(&self, name: &str, selected: I) -> LifecycleResult<MountOutcome>
    where
        I: IntoIterator,
        I::Item: Into<RecordId>,
    {
        self.selection.replace(selected);

        let Some(action) = self.registry.get(name, &self.selection) else {
            tracing::debug!("Bulk action '{}' not found; mount ignored", name);
            self.discard_mount();
            return Ok(MountOutcome::Ignored);
        };
        if action.is_disabled() {
            tracing::debug!("Bulk action '{}' is disabled; mount ignored", name);
            self.discard_mount();
            return Ok(MountOutcome::Ignored);
        }

        if let Some(previous) = self.mount.begin(name) {
            tracing::debug!("Replacing mounted bulk action '{}'", previous);
            if let Some(previous) = self.registry.find(&previous) {
                previous.reset_form_data();
            }
        }
        self.release_form();
        self.form_state.clear();

        let form = self.mounted_form(&action);
        let records = action.records();
        let ctx = HookContext {
            action: &action,
            form: form.as_ref(),
            records: &records,
        };

        // A panicking mount hook must not leave the register at Mounting.
        let guard = ResetGuard::new(self, action.clone());
        if action.has_form() {
            action.hooks().run(HookPoint::BeforeFormFilled, &ctx);
        }
        action.run_mount(&ctx);
        if action.has_form() {
            action.hooks().run(HookPoint::AfterFormFilled, &ctx);
        }
        guard.disarm();

        if !action.should_open_modal() {
            return self.call(None).map(MountOutcome::Called);
        }

        self.mount.set_phase(Phase::AwaitingConfirmation);
        self.signals.push(UiSignal::ResetErrors);
        self.signals.push(UiSignal::OpenConfirmation {
            id: self.confirmation_id(),
        });
        Ok(MountOutcome::AwaitingConfirmation)
    }

    /// Call the mounted action.
    ///
    /// `arguments` is a JSON object; anything else is treated as no
    /// arguments. Validation errors keep the mount so input can be fixed.
    /// Body or after-call failures are returned after the mount is reset.
    pub fn call(&self, arguments: Option<&str>) -> LifecycleResult<CallOutcome> {
        let Some(action) = self.mounted_action() else {
            tracing::debug!("No bulk action mounted; call ignored");
            return Ok(CallOutcome::Skipped);
        };
        if action.is_disabled() {
            tracing::debug!("Bulk action '{}' is disabled; call ignored", action.name());
            return Ok(CallOutcome::Skipped);
        }

        let form = self.mounted_form(&action);
        let records = action.records();
        let ctx = HookContext {
            action: &action,
            form: form.as_ref(),
            records: &records,
        };

        if action.has_form() {
            action.hooks().run(HookPoint::BeforeFormValidated, &ctx);
            let data = match form.state() {
                Ok(data) => data,
                Err(errors) => {
                    tracing::debug!(
                        "Bulk action '{}' form invalid: {}",
                        action.name(),
                        errors
                    );
                    self.mount.set_phase(Phase::AwaitingConfirmation);
                    return Err(errors.into());
                }
            };
            action.set_form_data(data);
            action.hooks().run(HookPoint::AfterFormValidated, &ctx);
        }

        action.hooks().run(HookPoint::BeforeCall, &ctx);

        self.mount.set_phase(Phase::Calling);
        let arguments = parse_arguments(arguments);
        let data = action.form_data();
        let guard = ResetGuard::new(self, action.clone());

        let result = action.call(&ActionInvocation {
            action: &action,
            arguments: &arguments,
            form: form.as_ref(),
            records: &records,
            data: &data,
        });

        let value = match result {
            Ok(value) => value,
            Err(Halt::Hold) => {
                guard.disarm();
                self.mount.set_phase(Phase::AwaitingConfirmation);
                tracing::debug!("Bulk action '{}' held", action.name());
                return Ok(CallOutcome::Held);
            }
            Err(Halt::Fail(error)) => {
                tracing::warn!("{}", error);
                return Err(error.into());
            }
        };

        let value = match action.run_after_call(&ctx) {
            Ok(Some(replacement)) if !replacement.is_null() => replacement,
            Ok(_) => value,
            Err(error) => {
                tracing::warn!("{}", error);
                return Err(error.into());
            }
        };

        drop(guard);
        tracing::debug!(
            "Bulk action '{}' completed for {} record(s)",
            action.name(),
            records.len()
        );
        Ok(CallOutcome::Completed(value))
    }

    /// Abandon the mounted action without calling it.
    ///
    /// Returns false if nothing was mounted.
    pub fn cancel(&self) -> bool {
        let Some(name) = self.mount.mounted() else {
            return false;
        };
        let action = self.registry.find(&name);
        self.reset(action.as_deref());
        tracing::debug!("Cancelled bulk action '{}'", name);
        true
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// The form for the current mount, built on first use.
    fn mounted_form(&self, action: &BulkAction) -> Arc<dyn FormBinding> {
        let mut cached = self.cached_form.lock();
        if let Some(form) = cached.as_ref() {
            return form.clone();
        }
        let form = self.forms.build(
            action.form_schema(),
            &self.table.model,
            self.form_state.clone(),
        );
        *cached = Some(form.clone());
        form
    }

    fn release_form(&self) {
        self.cached_form.lock().take();
    }

    /// Reset the current mount, if there is one.
    fn discard_mount(&self) {
        let Some(name) = self.mount.mounted() else {
            return;
        };
        tracing::debug!("Discarding mounted bulk action '{}'", name);
        let action = self.registry.find(&name);
        self.reset(action.as_deref());
    }

    /// Clear everything the mount owns and close the confirmation surface.
    fn reset(&self, action: Option<&BulkAction>) {
        self.mount.clear();
        self.selection.clear();
        if let Some(action) = action {
            action.reset_form_data();
            action.bind_records(Vec::new());
        }
        self.form_state.clear();
        self.release_form();
        self.signals.push(UiSignal::CloseConfirmation {
            id: self.confirmation_id(),
        });
    }
}

impl std::fmt::Debug for BulkActionLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkActionLifecycle")
            .field("table", &self.table)
            .field("mount", &self.mount.snapshot())
            .field("selected", &self.selection.len())
            .field("pending_signals", &self.signals.len())
            .finish()
    }
}

/// Resets the lifecycle when dropped, unless disarmed.
///
/// Covers the mount hooks and the body, so the reset also happens when a
/// mount hook panics or the body or after-call hook fails or panics.
struct ResetGuard<'a> {
    lifecycle: &'a BulkActionLifecycle,
    action: Arc<BulkAction>,
    armed: bool,
}

impl<'a> ResetGuard<'a> {
    fn new(lifecycle: &'a BulkActionLifecycle, action: Arc<BulkAction>) -> Self {
        Self {
            lifecycle,
            action,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.lifecycle.reset(Some(&self.action));
        }
    }
}

/// Parse raw call arguments. Anything but a JSON object yields no arguments.
fn parse_arguments(raw: Option<&str>) -> serde_json::Map<String, Value> {
    let Some(raw) = raw else {
        return serde_json::Map::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(arguments)) => arguments,
        Ok(other) => {
            tracing::debug!("Ignoring non-object bulk action arguments: {}", other);
            serde_json::Map::new()
        }
        Err(e) => {
            tracing::debug!("Could not parse bulk action arguments: {}", e);
            serde_json::Map::new()
        }
    }
}

#[cfg(test)]
mod tests;
