//! Signals emitted towards the presentation layer.

use serde::{Deserialize, Serialize};

/// A fire-and-forget notification for whatever renders the table.
///
/// The core never waits on a response; the presentation layer drains
/// these and updates its surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiSignal {
    /// Show the confirmation surface with the given id.
    OpenConfirmation { id: String },

    /// Hide the confirmation surface with the given id.
    CloseConfirmation { id: String },

    /// Drop any validation messages still displayed from a previous attempt.
    ResetErrors,
}

impl UiSignal {
    /// The confirmation surface this signal targets, if any.
    pub fn surface_id(&self) -> Option<&str> {
        match self {
            Self::OpenConfirmation { id } | Self::CloseConfirmation { id } => Some(id),
            Self::ResetErrors => None,
        }
    }
}
