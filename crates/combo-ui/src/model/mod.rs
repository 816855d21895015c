//! State model for the combobox.
//!
//! This module contains the state record and the transition function that
//! drive the widget. All types are renderer-independent for testability.

mod state;

pub use state::{transition, Change, ComboEvent, ComboKey, ComboState, MatchStatus, Transition};
