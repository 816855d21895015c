//! Case-insensitive prefix filtering.

use crate::option::OptionList;

/// Check whether `label` starts with `query`, ignoring case.
pub fn matches_prefix(label: &str, query: &str) -> bool {
    label.to_lowercase().starts_with(&query.to_lowercase())
}

/// Return the indices of options whose label starts with `query`.
///
/// Indices keep the original option order. An empty query matches every
/// option. Only prefixes match; "apple" does not match "Pineapple".
pub fn prefix_filter(query: &str, options: &OptionList) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let query = query.to_lowercase();
    let matches: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.label.to_lowercase().starts_with(&query))
        .map(|(index, _)| index)
        .collect();

    tracing::trace!("prefix filter '{}' matched {} option(s)", query, matches.len());
    matches
}
