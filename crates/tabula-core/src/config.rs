//! Configuration types.
//!
//! Configuration lives in `config.toml` inside the tabula config directory.
//! Every section is optional; anything left out falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Bulk action behaviour
    #[serde(default)]
    pub actions: ActionsConfig,

    /// Filter presentation
    #[serde(default)]
    pub filters: FiltersConfig,
}

impl TableConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the user's configuration from the platform config directory.
    pub fn load_user() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load(&path)
    }
}

/// Bulk action settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Appended to the table id to name the confirmation surface.
    pub confirmation_suffix: String,

    /// State path the mounted action's form data is bound under.
    pub form_state_path: String,

    /// Treat two actions sharing a name as a configuration error
    /// instead of letting the later one win.
    pub strict_names: bool,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            confirmation_suffix: "-table-bulk-action".to_string(),
            form_state_path: "mountedTableBulkActionData".to_string(),
            strict_names: false,
        }
    }
}

/// Filter settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltersConfig {
    #[serde(default)]
    pub trashed: TrashedLabels,
}

/// Labels shown by the trashed filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrashedLabels {
    pub label: String,
    /// Shown for the blank state.
    pub placeholder: String,
    pub true_label: String,
    pub false_label: String,
}

impl Default for TrashedLabels {
    fn default() -> Self {
        Self {
            label: "Deleted records".to_string(),
            placeholder: "Without deleted records".to_string(),
            true_label: "With deleted records".to_string(),
            false_label: "Only deleted records".to_string(),
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tabula"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
