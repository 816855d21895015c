//! Option records offered by a combobox.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::OptionsError;

/// Stable option identifier.
///
/// Owners may key their options by text or by number; both render verbatim
/// inside generated element ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionId::Number(n) => write!(f, "{}", n),
            OptionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for OptionId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for OptionId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// A single selectable entry.
///
/// Identity is by `id`; display and matching use `label`. Any other fields
/// supplied by the owner are carried untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboOption {
    /// Unique identifier within the option list.
    pub id: OptionId,

    /// Display text, also used for prefix matching.
    pub label: String,

    /// Owner-defined fields, passed back untouched through change callbacks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ComboOption {
    /// Create an option with no extra fields.
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra owner-defined field.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up an extra field.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Ordered, read-only option sequence with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OptionList {
    options: Vec<ComboOption>,
}

impl OptionList {
    /// Build a list, rejecting duplicate ids.
    pub fn new(options: Vec<ComboOption>) -> Result<Self, OptionsError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(&option.id) {
                return Err(OptionsError::DuplicateId(option.id.clone()));
            }
        }
        Ok(Self { options })
    }

    /// Create an empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the option at an index.
    pub fn get(&self, index: usize) -> Option<&ComboOption> {
        self.options.get(index)
    }

    /// Find the index of the option with the given id.
    pub fn position(&self, id: &OptionId) -> Option<usize> {
        self.options.iter().position(|o| &o.id == id)
    }

    /// Get the number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate options in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ComboOption> {
        self.options.iter()
    }

    /// Borrow the options as a slice.
    pub fn as_slice(&self) -> &[ComboOption] {
        &self.options
    }
}

impl TryFrom<Vec<ComboOption>> for OptionList {
    type Error = OptionsError;

    fn try_from(options: Vec<ComboOption>) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl<'de> Deserialize<'de> for OptionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let options = Vec::<ComboOption>::deserialize(deserializer)?;
        Self::new(options).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a ComboOption;
    type IntoIter = std::slice::Iter<'a, ComboOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
