//! Core types for the Combo autocomplete widget.
//!
//! This crate contains the data structures shared by the widget crates:
//! - Option records and the validated option list
//! - The prefix filter used to narrow the option list
//! - Configuration types
//! - Error types

mod config;
mod error;
mod filter;
mod option;

pub use config::{config_dir, default_config_path, ComboBoxConfig, DEFAULT_TRIGGER_LABEL};
pub use error::{ConfigError, OptionsError};
pub use filter::{matches_prefix, prefix_filter};
pub use option::{ComboOption, OptionId, OptionList};
