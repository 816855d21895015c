//! Error types for the Combo widget.
//!
//! The interaction state machine never fails; these errors only surface
//! while building an option list or loading configuration.

use thiserror::Error;

use crate::option::OptionId;

/// Option list construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Two options share the same id.
    #[error("Duplicate option id: {0}")]
    DuplicateId(OptionId),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured options are invalid.
    #[error("Invalid options: {0}")]
    Options(#[from] OptionsError),
}
