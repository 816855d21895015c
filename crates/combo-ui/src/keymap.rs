//! Key name mapping.
//!
//! Hosts report keys by name. This module maps those names onto the small
//! set of keys the navigator understands.
//!
//! Accepted spellings are case-insensitive and cover both DOM-style names
//! ("ArrowDown", "Escape") and short keystroke names ("down", "esc").

use crate::model::ComboKey;

/// Normalize a key name for lookup.
///
/// "Arrow-Down", "arrow_down" and "ArrowDown" all become "arrowdown".
fn normalize_key_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map a host key name to a `ComboKey`.
///
/// Unknown names map to `ComboKey::Other`.
pub fn key_from_name(name: &str) -> ComboKey {
    match normalize_key_name(name).as_str() {
        "arrowdown" | "down" => ComboKey::ArrowDown,
        "arrowup" | "up" => ComboKey::ArrowUp,
        "enter" | "return" => ComboKey::Enter,
        "escape" | "esc" => ComboKey::Escape,
        _ => ComboKey::Other,
    }
}
