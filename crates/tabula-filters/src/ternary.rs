//! Three-state filter.
//!
//! A [`TernaryFilter`] shows a select with three choices: a placeholder for
//! "no choice", a true label and a false label. Each choice maps to a query
//! transform.

use serde_json::Value;
use std::sync::Arc;

use tabula_core::TernaryValue;

/// A query transform.
pub type QueryFn<Q> = Arc<dyn Fn(Q) -> Q + Send + Sync>;

/// A filter with `true`, `false` and blank states.
pub struct TernaryFilter<Q> {
    name: String,
    label: Option<String>,
    placeholder: String,
    true_label: String,
    false_label: String,
    default: TernaryValue,
    true_query: Option<QueryFn<Q>>,
    false_query: Option<QueryFn<Q>>,
    blank_query: Option<QueryFn<Q>>,
    base_query: Option<QueryFn<Q>>,
}

impl<Q> TernaryFilter<Q> {
    /// Create a filter. Every state leaves the query untouched until
    /// [`queries`](Self::queries) is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            placeholder: "-".to_string(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
            default: TernaryValue::Blank,
            true_query: None,
            false_query: None,
            blank_query: None,
            base_query: None,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text shown for the blank state.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn true_label(mut self, label: impl Into<String>) -> Self {
        self.true_label = label.into();
        self
    }

    pub fn false_label(mut self, label: impl Into<String>) -> Self {
        self.false_label = label.into();
        self
    }

    /// State used when nothing was submitted.
    pub fn default(mut self, value: TernaryValue) -> Self {
        self.default = value;
        self
    }

    /// Set the transform for each state.
    pub fn queries<T, F, B>(mut self, true_query: T, false_query: F, blank_query: B) -> Self
    where
        T: Fn(Q) -> Q + Send + Sync + 'static,
        F: Fn(Q) -> Q + Send + Sync + 'static,
        B: Fn(Q) -> Q + Send + Sync + 'static,
    {
        self.true_query = Some(Arc::new(true_query));
        self.false_query = Some(Arc::new(false_query));
        self.blank_query = Some(Arc::new(blank_query));
        self
    }

    /// Set the transform applied to the base query whatever the state.
    pub fn base_query<F>(mut self, base_query: F) -> Self
    where
        F: Fn(Q) -> Q + Send + Sync + 'static,
    {
        self.base_query = Some(Arc::new(base_query));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label. Defaults to the name with underscores as spaces and
    /// the first letter capitalized.
    pub fn get_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let spaced = self.name.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn get_placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn get_true_label(&self) -> &str {
        &self.true_label
    }

    pub fn get_false_label(&self) -> &str {
        &self.false_label
    }

    pub fn get_default(&self) -> TernaryValue {
        self.default
    }

    /// Choices in display order, blank first.
    pub fn options(&self) -> [(TernaryValue, &str); 3] {
        [
            (TernaryValue::Blank, self.placeholder.as_str()),
            (TernaryValue::True, self.true_label.as_str()),
            (TernaryValue::False, self.false_label.as_str()),
        ]
    }

    /// Label of the current state, for an "active filters" indicator.
    /// Blank is not an active filter.
    pub fn indicator(&self, value: TernaryValue) -> Option<String> {
        let choice = match value {
            TernaryValue::True => &self.true_label,
            TernaryValue::False => &self.false_label,
            TernaryValue::Blank => return None,
        };
        Some(format!("{}: {}", self.get_label(), choice))
    }

    // =========================================================================
    // Applying
    // =========================================================================

    /// Interpret submitted state. `None` means nothing was submitted and
    /// yields the default.
    pub fn state(&self, raw: Option<&Value>) -> TernaryValue {
        match raw {
            Some(value) => TernaryValue::parse(value),
            None => self.default,
        }
    }

    /// Apply the transform for `value`.
    pub fn apply(&self, query: Q, value: TernaryValue) -> Q {
        let transform = match value {
            TernaryValue::True => &self.true_query,
            TernaryValue::False => &self.false_query,
            TernaryValue::Blank => &self.blank_query,
        };
        tracing::debug!("Applying filter '{}' with state {:?}", self.name, value);
        match transform {
            Some(transform) => transform(query),
            None => query,
        }
    }

    /// Apply the base query transform, if any.
    pub fn apply_to_base_query(&self, query: Q) -> Q {
        match &self.base_query {
            Some(transform) => transform(query),
            None => query,
        }
    }

    /// Base query transform followed by the transform for `value`.
    pub fn filter(&self, query: Q, value: TernaryValue) -> Q {
        self.apply(self.apply_to_base_query(query), value)
    }
}

impl<Q> std::fmt::Debug for TernaryFilter<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TernaryFilter")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("true_label", &self.true_label)
            .field("false_label", &self.false_label)
            .field("default", &self.default)
            .field("has_queries", &self.true_query.is_some())
            .field("has_base_query", &self.base_query.is_some())
            .finish()
    }
}
