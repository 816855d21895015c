//! Element identifiers.
//!
//! Every rendered element id derives from one prefix. The prefix comes from
//! configuration or, when absent, from an `IdProvider`.

use combo_core::OptionId;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Id Providers
// =============================================================================

/// Source of id prefixes for widgets created without an explicit id.
///
/// Implementations must return a different value on every call.
#[cfg_attr(test, mockall::automock)]
pub trait IdProvider {
    /// Generate a fresh id prefix.
    fn generate(&self) -> String;
}

/// Generates `combobox-<uuid>` prefixes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn generate(&self) -> String {
        format!("combobox-{}", uuid::Uuid::new_v4().simple())
    }
}

/// Generates `combobox-1`, `combobox-2`, ... from a counter.
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    counter: AtomicU64,
}

impl SequentialIdProvider {
    /// Create a provider starting at 1.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("combobox-{}", n)
    }
}

// =============================================================================
// Element Ids
// =============================================================================

/// Ids of the elements making up one combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    prefix: String,
}

impl ElementIds {
    /// Derive ids from a prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Derive ids from a freshly generated prefix.
    pub fn generate(provider: &dyn IdProvider) -> Self {
        Self::new(provider.generate())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn label(&self) -> String {
        format!("{}-label", self.prefix)
    }

    pub fn combobox(&self) -> String {
        format!("{}-combobox", self.prefix)
    }

    pub fn input(&self) -> String {
        format!("{}-input", self.prefix)
    }

    pub fn trigger(&self) -> String {
        format!("{}-combobox-arrow", self.prefix)
    }

    pub fn listbox(&self) -> String {
        format!("{}-listbox", self.prefix)
    }

    /// Id of the list entry for an option.
    pub fn option(&self, id: &OptionId) -> String {
        format!("{}-option-{}", self.prefix, id)
    }
}
