//! Accessible autocomplete combobox.
//!
//! This crate provides:
//! - The renderer-independent state machine (`model`)
//! - Key name mapping (`keymap`)
//! - Element id generation (`id`)
//! - The accessibility tree projection (`accessibility`)
//! - The stateful `ComboBox` widget

pub mod accessibility;
pub mod id;
pub mod keymap;
pub mod model;
pub mod widget;

// Re-export commonly used types
pub use accessibility::{build_tree, AccessibleNode, AccessibleRole, TreeContext};
pub use combo_core::{ComboBoxConfig, ComboOption, OptionId, OptionList};
pub use id::{ElementIds, IdProvider, SequentialIdProvider, UuidIdProvider};
pub use keymap::key_from_name;
pub use model::{transition, Change, ComboEvent, ComboKey, ComboState, MatchStatus, Transition};
pub use widget::{ChangeHandler, ComboBox};
