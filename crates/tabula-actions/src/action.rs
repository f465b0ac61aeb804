//! The bulk action descriptor.
//!
//! A [`BulkAction`] is built once per table-configuration pass and then
//! shared behind an `Arc`. The pieces that change while it is mounted,
//! the bound selection and the validated form data, sit behind locks.

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use tabula_core::{RecordId, RecordSet};

use crate::error::{ActionError, Halt};
use crate::form::{FormBinding, FormData, FormField};
use crate::hooks::{ActionHooks, HookContext, HookPoint};
use crate::table::TableContext;

/// What an action body receives.
pub struct ActionInvocation<'a> {
    pub action: &'a BulkAction,
    /// Parsed call arguments. Empty when none were given or they did not parse.
    pub arguments: &'a serde_json::Map<String, Value>,
    pub form: &'a dyn FormBinding,
    pub records: &'a RecordSet,
    /// Validated form data. Empty for actions without a form.
    pub data: &'a FormData,
}

/// The action body.
pub type ActionBody = Arc<dyn Fn(&ActionInvocation<'_>) -> Result<Value, Halt> + Send + Sync>;

/// Predicate over the action, used for `hidden` and `disabled`.
pub type ActionPredicate = Arc<dyn Fn(&BulkAction) -> bool + Send + Sync>;

/// Runs when the action is mounted: `(action, form, records)`.
pub type MountFn = Arc<dyn Fn(&HookContext<'_>) + Send + Sync>;

/// Runs after a successful body. A non-null value replaces the body's result.
pub type AfterCallFn =
    Arc<dyn Fn(&HookContext<'_>) -> Result<Option<Value>, ActionError> + Send + Sync>;

/// Default mount hook: fill the form so field defaults apply.
fn fill_with_defaults(ctx: &HookContext<'_>) {
    ctx.form.fill(FormData::new());
}

/// A boolean that is either fixed or computed on demand.
#[derive(Clone)]
enum Flag {
    Fixed(bool),
    When(ActionPredicate),
}

impl Flag {
    fn eval(&self, action: &BulkAction) -> bool {
        match self {
            Flag::Fixed(value) => *value,
            Flag::When(predicate) => predicate(action),
        }
    }
}

/// An operation run against the selected records of a table.
pub struct BulkAction {
    name: String,
    label: Option<String>,
    hidden: Flag,
    disabled: Flag,
    requires_confirmation: bool,
    form_schema: Vec<FormField>,
    body: Option<ActionBody>,
    mount_using: MountFn,
    after_call: Option<AfterCallFn>,
    hooks: ActionHooks,

    /// Set by the registry when the action is cached.
    table: Option<Arc<TableContext>>,

    /// Selection bound by the registry on lookup.
    selected: RwLock<Vec<RecordId>>,

    /// Validated form data from the current call.
    data: RwLock<FormData>,
}

impl BulkAction {
    /// Create an action. By default it is visible, enabled, has no form and
    /// fills its form on mount.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            hidden: Flag::Fixed(false),
            disabled: Flag::Fixed(false),
            requires_confirmation: false,
            form_schema: Vec::new(),
            body: None,
            mount_using: Arc::new(fill_with_defaults),
            after_call: None,
            hooks: ActionHooks::new(),
            table: None,
            selected: RwLock::new(Vec::new()),
            data: RwLock::new(FormData::new()),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Flag::Fixed(hidden);
        self
    }

    /// Hide the action whenever `predicate` holds. Evaluated on every listing.
    pub fn hidden_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&BulkAction) -> bool + Send + Sync + 'static,
    {
        self.hidden = Flag::When(Arc::new(predicate));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Flag::Fixed(disabled);
        self
    }

    /// Disable the action whenever `predicate` holds. Sees the bound selection.
    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&BulkAction) -> bool + Send + Sync + 'static,
    {
        self.disabled = Flag::When(Arc::new(predicate));
        self
    }

    /// Pause for confirmation even without a form.
    pub fn requires_confirmation(mut self) -> Self {
        self.requires_confirmation = true;
        self
    }

    pub fn form(mut self, schema: Vec<FormField>) -> Self {
        self.form_schema = schema;
        self
    }

    /// Set the action body.
    pub fn action<F>(mut self, body: F) -> Self
    where
        F: Fn(&ActionInvocation<'_>) -> Result<Value, Halt> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    /// Replace the mount hook. The default fills the form with its defaults.
    pub fn mount_using<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        self.mount_using = Arc::new(hook);
        self
    }

    pub fn before_form_filled<F>(self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        self.hooks.add(HookPoint::BeforeFormFilled, hook);
        self
    }

    pub fn after_form_filled<F>(self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        self.hooks.add(HookPoint::AfterFormFilled, hook);
        self
    }

    pub fn before_form_validated<F>(self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        self.hooks.add(HookPoint::BeforeFormValidated, hook);
        self
    }

    pub fn after_form_validated<F>(self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        self.hooks.add(HookPoint::AfterFormValidated, hook);
        self
    }

    pub fn before<F>(self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) + Send + Sync + 'static,
    {
        self.hooks.add(HookPoint::BeforeCall, hook);
        self
    }

    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<Option<Value>, ActionError> + Send + Sync + 'static,
    {
        self.after_call = Some(Arc::new(hook));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label, defaulting to the name.
    pub fn get_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.eval(self)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.eval(self)
    }

    pub fn has_form(&self) -> bool {
        !self.form_schema.is_empty()
    }

    pub fn form_schema(&self) -> &[FormField] {
        &self.form_schema
    }

    /// Whether mounting opens a confirmation surface instead of calling
    /// straight away.
    pub fn should_open_modal(&self) -> bool {
        self.requires_confirmation || self.has_form()
    }

    pub fn hooks(&self) -> &ActionHooks {
        &self.hooks
    }

    pub fn table(&self) -> Option<&Arc<TableContext>> {
        self.table.as_ref()
    }

    // =========================================================================
    // Bound State
    // =========================================================================

    /// Attach the owning table. Done once by the registry while caching.
    pub(crate) fn bind_table(&mut self, table: Arc<TableContext>) {
        self.table = Some(table);
    }

    /// Bind the selection the action will run against.
    pub fn bind_records(&self, ids: Vec<RecordId>) {
        *self.selected.write() = ids;
    }

    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selected.read().clone()
    }

    /// Resolve the bound selection through the table. Empty when unbound.
    pub fn records(&self) -> RecordSet {
        let ids = self.selected_ids();
        match &self.table {
            Some(table) => table.records(&ids),
            None => RecordSet::new(),
        }
    }

    pub fn form_data(&self) -> FormData {
        self.data.read().clone()
    }

    pub fn set_form_data(&self, data: FormData) {
        *self.data.write() = data;
    }

    pub fn reset_form_data(&self) {
        self.data.write().clear();
    }

    // =========================================================================
    // Execution
    // =========================================================================

    pub(crate) fn run_mount(&self, ctx: &HookContext<'_>) {
        (self.mount_using)(ctx);
    }

    /// Run the body. An action without a body completes with `null`.
    pub(crate) fn call(&self, invocation: &ActionInvocation<'_>) -> Result<Value, Halt> {
        match &self.body {
            Some(body) => body(invocation),
            None => Ok(Value::Null),
        }
    }

    pub(crate) fn run_after_call(
        &self,
        ctx: &HookContext<'_>,
    ) -> Result<Option<Value>, ActionError> {
        match &self.after_call {
            Some(hook) => hook(ctx),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkAction")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("requires_confirmation", &self.requires_confirmation)
            .field("form_fields", &self.form_schema.len())
            .field("has_body", &self.body.is_some())
            .field("has_after_call", &self.after_call.is_some())
            .field("hooks", &self.hooks.count())
            .finish()
    }
}
