//! Error types for bulk actions.
//!
//! Lifecycle operations return `LifecycleResult<T>`. Action bodies return
//! `Result<_, Halt>` so they can either fail or ask to be held.

use thiserror::Error;

use crate::form::ValidationErrors;

/// A failure raised by an action body or one of its hooks.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Failure described by a message.
    #[error("Action '{action}' failed: {message}")]
    Failed { action: String, message: String },

    /// Failure wrapping an underlying error.
    #[error("Action '{action}' failed: {source}")]
    Source {
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ActionError {
    /// Failure with a message.
    pub fn failed(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Failure wrapping another error.
    pub fn source(
        action: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Source {
            action: action.into(),
            source: source.into(),
        }
    }

    /// Name of the action that failed.
    pub fn action(&self) -> &str {
        match self {
            Self::Failed { action, .. } | Self::Source { action, .. } => action,
        }
    }
}

/// Why an action body stopped without producing a value.
#[derive(Debug)]
pub enum Halt {
    /// Pause without completing. The mount stays in place and no cleanup
    /// runs; the caller decides what happens next.
    Hold,

    /// The body failed.
    Fail(ActionError),
}

impl From<ActionError> for Halt {
    fn from(e: ActionError) -> Self {
        Halt::Fail(e)
    }
}

/// Errors from building the action registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two actions share a name while strict naming is on.
    #[error("Action '{0}' is registered more than once")]
    DuplicateAction(String),
}

/// Errors surfaced by lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Form input did not validate. The mount is kept so input can be corrected.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The action body or after-call hook failed. Mount state was already reset.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type alias for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
