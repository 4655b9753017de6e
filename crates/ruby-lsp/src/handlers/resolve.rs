//! The shared name-resolution sequence used by `definition` and `hover`.
//!
//! Strip a leading `:` (Ruby symbol literals resolve through the same word
//! rule as bareword identifiers), try an exact lookup, retry with a
//! capitalized form if the word started lowercase, then fall back to the
//! Rails convention resolver.

use std::path::Path;

use ruby_lsp_index::WorkspaceIndex;
use ruby_lsp_symbols::SymbolEntry;

pub(crate) fn resolve_entries(index: &WorkspaceIndex, workspace_root: Option<&Path>, word: &str) -> Vec<SymbolEntry> {
    let word = word.strip_prefix(':').unwrap_or(word);
    if word.is_empty() {
        return Vec::new();
    }

    let entries = index.lookup(word);
    if !entries.is_empty() {
        return entries;
    }

    let starts_lowercase = word.chars().next().is_some_and(|c| c.is_lowercase());
    let capitalized = if starts_lowercase { ruby_lsp_extractor::capitalize(word) } else { word.to_string() };

    if starts_lowercase {
        let entries = index.lookup(&capitalized);
        if !entries.is_empty() {
            return entries;
        }
    }

    match workspace_root {
        Some(root) => ruby_lsp_index::resolve_by_convention(root, &capitalized),
        None => Vec::new(),
    }
}
