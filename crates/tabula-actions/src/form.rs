//! Form contract used by actions that collect input.
//!
//! The lifecycle only needs three things from a form: a way to build one
//! for a schema ([`FormProvider`]), a way to fill it and a way to read its
//! validated state ([`FormBinding`]). [`SchemaForm`] is a small reference
//! binding that understands required fields and defaults.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Form values keyed by field name.
pub type FormData = serde_json::Map<String, Value>;

// =============================================================================
// Schema
// =============================================================================

/// A field in an action's form schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: Option<String>,
    pub required: bool,
    pub default: Option<Value>,
}

impl FormField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            required: false,
            default: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Label used in validation messages: the explicit label, or the
    /// field name with underscores turned into spaces.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.name.replace('_', " "))
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field.
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Fields with at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    fn first(&self) -> Option<&str> {
        self.errors
            .values()
            .flat_map(|messages| messages.iter())
            .next()
            .map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.len()) {
            (None, _) => f.write_str("The given data was invalid."),
            (Some(first), 1) => f.write_str(first),
            (Some(first), n) => write!(f, "{} (and {} more errors)", first, n - 1),
        }
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Form State
// =============================================================================

/// The mount's form data, shared between the lifecycle and the binding
/// built over it.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    path: String,
    data: Arc<RwLock<FormData>>,
}

impl FormState {
    /// Create an empty state bound under `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: Arc::new(RwLock::new(FormData::new())),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Copy of the current values.
    pub fn snapshot(&self) -> FormData {
        self.data.read().clone()
    }

    pub fn get(&self, field: &str) -> Option<Value> {
        self.data.read().get(field).cloned()
    }

    pub fn set(&self, field: impl Into<String>, value: Value) {
        self.data.write().insert(field.into(), value);
    }

    pub fn replace(&self, data: FormData) {
        *self.data.write() = data;
    }

    pub fn clear(&self) {
        self.data.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

// =============================================================================
// Binding Contract
// =============================================================================

/// A form instance bound to a schema and a state store.
#[cfg_attr(test, mockall::automock)]
pub trait FormBinding: Send + Sync {
    /// Path the form state is bound under.
    fn state_path(&self) -> String;

    /// Populate the form. Fields absent from `data` take their defaults.
    fn fill(&self, data: FormData);

    /// Current values without validation.
    fn raw_state(&self) -> FormData;

    /// Validated values, or the field-keyed errors that prevented validation.
    fn state(&self) -> Result<FormData, ValidationErrors>;
}

/// Builds form bindings for mounted actions.
pub trait FormProvider: Send + Sync {
    fn build(&self, schema: &[FormField], model: &str, state: FormState) -> Arc<dyn FormBinding>;
}

// =============================================================================
// Reference Implementation
// =============================================================================

/// A form that validates required fields and applies defaults.
#[derive(Debug)]
pub struct SchemaForm {
    schema: Vec<FormField>,
    model: String,
    state: FormState,
}

impl SchemaForm {
    pub fn new(schema: Vec<FormField>, model: impl Into<String>, state: FormState) -> Self {
        Self {
            schema,
            model: model.into(),
            state,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn is_blank(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        }
    }
}

impl FormBinding for SchemaForm {
    fn state_path(&self) -> String {
        self.state.path().to_string()
    }

    fn fill(&self, mut data: FormData) {
        let filled = self
            .schema
            .iter()
            .map(|field| {
                let value = data
                    .remove(&field.name)
                    .or_else(|| field.default.clone())
                    .unwrap_or(Value::Null);
                (field.name.clone(), value)
            })
            .collect();
        self.state.replace(filled);
    }

    fn raw_state(&self) -> FormData {
        self.state.snapshot()
    }

    fn state(&self) -> Result<FormData, ValidationErrors> {
        let current = self.state.snapshot();
        let mut errors = ValidationErrors::new();
        let mut validated = FormData::new();

        for field in &self.schema {
            let value = current.get(&field.name);
            if field.required && Self::is_blank(value) {
                errors.add(
                    field.name.clone(),
                    format!("The {} field is required.", field.display_label()),
                );
                continue;
            }
            validated.insert(field.name.clone(), value.cloned().unwrap_or(Value::Null));
        }

        if errors.is_empty() {
            Ok(validated)
        } else {
            Err(errors)
        }
    }
}

/// Provider for [`SchemaForm`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaFormProvider;

impl FormProvider for SchemaFormProvider {
    fn build(&self, schema: &[FormField], model: &str, state: FormState) -> Arc<dyn FormBinding> {
        Arc::new(SchemaForm::new(schema.to_vec(), model, state))
    }
}
