//! Merging a function's environment document into a project's.
//!
//! The project's existing values always win. Incoming assignments for keys the
//! project already defines are kept, but disabled with [`DISABLED_PREFIX`], so
//! the user can still see what the function shipped with. Each merge appends a
//! labelled separator so repeated installs stay readable.

use serde::Serialize;

use super::document::{line_key, EnvDocument};

/// Prefix applied to incoming lines whose key the project already defines.
pub const DISABLED_PREFIX: &str = "# ";

/// Output of a merge: the text to persist and the keys it introduced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeResult {
    pub merged_text: String,
    /// Keys present in the incoming document but not in the current one, in
    /// incoming order.
    pub new_keys: Vec<String>,
    /// Incoming keys that were disabled because the project already has them.
    pub disabled_keys: Vec<String>,
}

/// Separator block placed between the current document and merged-in lines.
pub fn separator(function_label: &str) -> String {
    format!("\n\n# Variables for function \"{function_label}\"\n# ---\n")
}

/// Result for a project that has no environment document yet.
///
/// The incoming text becomes the whole document verbatim: no separator, no
/// disabled lines.
pub fn initial_env(incoming: &str) -> MergeResult {
    MergeResult {
        merged_text: incoming.to_string(),
        new_keys: EnvDocument::parse(incoming).keys().map(str::to_string).collect(),
        disabled_keys: Vec::new(),
    }
}

/// Merge `incoming` into `current`. Pure; never fails.
pub fn merge_env(current: &str, incoming: &str, function_label: &str) -> MergeResult {
    let current_doc = EnvDocument::parse(current);
    let incoming_doc = EnvDocument::parse(incoming);

    let (disabled_keys, new_keys): (Vec<String>, Vec<String>) = incoming_doc
        .keys()
        .map(str::to_string)
        .partition(|key| current_doc.contains_key(key));

    let rewritten = incoming
        .split('\n')
        .map(|line| match line_key(line) {
            Some(key) if current_doc.contains_key(key) => format!("{DISABLED_PREFIX}{line}"),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut merged_text = String::with_capacity(current.len() + rewritten.len() + 64);
    merged_text.push_str(current);
    merged_text.push_str(&separator(function_label));
    merged_text.push_str(&rewritten);

    MergeResult {
        merged_text,
        new_keys,
        disabled_keys,
    }
}

/// Pick the right path depending on whether the project has a document.
///
/// `None` means the file does not exist, which is different from an empty
/// file: an empty file still gets a separator.
pub fn plan_env(current: Option<&str>, incoming: &str, function_label: &str) -> MergeResult {
    match current {
        Some(current) => merge_env(current, incoming, function_label),
        None => initial_env(incoming),
    }
}
