//! Configuration types.
//!
//! A combobox is described by a small TOML document:
//!
//! ```toml
//! id = "fruit"
//! label = "Select Fruit"
//!
//! [[options]]
//! id = "banana"
//! label = "Banana"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::option::OptionList;

/// Accessible name used for the dropdown toggle when none is configured.
pub const DEFAULT_TRIGGER_LABEL: &str = "Show options";

/// Construction parameters for a combobox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboBoxConfig {
    /// Element id prefix. Generated by an id provider when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Accessible name for the field.
    pub label: String,

    /// Accessible name for the dropdown toggle.
    #[serde(default = "default_trigger_label")]
    pub trigger_label: String,

    /// Options offered by the list.
    #[serde(default)]
    pub options: OptionList,
}

fn default_trigger_label() -> String {
    DEFAULT_TRIGGER_LABEL.to_string()
}

impl ComboBoxConfig {
    /// Create a config with a label and no options.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            trigger_label: default_trigger_label(),
            options: OptionList::empty(),
        }
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(
            "Loaded combobox config from {} ({} options)",
            path.display(),
            config.options.len()
        );
        Ok(config)
    }

    /// Load the config from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load(&path)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("combo"))
}

/// Get the path to the default config file.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("combo.toml"))
}
