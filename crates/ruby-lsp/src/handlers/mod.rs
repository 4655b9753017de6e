//! Feature handlers (C8). Each module corresponds to one LSP method.
//!
//! Handlers degrade gracefully when the workspace index isn't `ready`
//! yet: they return empty results rather than blocking on the background
//! scan.

pub mod code_action;
pub mod completion;
pub mod definition;
pub mod document_highlight;
pub mod document_symbol;
pub mod folding_range;
pub mod formatting;
pub mod hover;
pub mod lifecycle;
pub mod references;
pub mod rename;
mod resolve;
pub mod text_sync;
pub mod workspace_symbol;

use std::path::Path;

use ruby_lsp_document::Document;
use ruby_lsp_position::Position;
use serde_json::Value;

use crate::error::ServerError;

pub(crate) use resolve::resolve_entries;

/// Extract `textDocument.uri` from a request's params.
pub(crate) fn uri_from_params(params: &Value) -> Result<String, ServerError> {
    params
        .get("textDocument")
        .and_then(|td| td.get("uri"))
        .and_then(|u| u.as_str())
        .map(str::to_string)
        .ok_or_else(|| ServerError::InvalidParams {
            method: "textDocument/*".to_string(),
            reason: "missing textDocument.uri".to_string(),
        })
}

/// Extract `position.{line,character}` from a request's params.
pub(crate) fn position_from_params(params: &Value) -> Option<Position> {
    let position = params.get("position")?;
    let line = position.get("line")?.as_u64()?;
    let character = position.get("character")?.as_u64()?;
    Some(Position::new(line as u32, character as u32))
}

/// Locate the identifier at `position` in `document`, per the "word at
/// position" rule: expand left/right from the character-th code point of
/// the line over letters, digits, `_`, `:`, `!`, `?`, `=`.
pub(crate) fn word_at(document: &Document, position: Position) -> String {
    match document.line(position.line) {
        Some(line) => ruby_lsp_extractor::word_at(line, position.character),
        None => String::new(),
    }
}

/// Render `file_path` relative to `workspace_root`, falling back to the
/// path as given when it isn't actually inside the root.
pub(crate) fn relative_path(workspace_root: Option<&Path>, file_path: &str) -> String {
    match workspace_root {
        Some(root) => Path::new(file_path)
            .strip_prefix(root)
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| file_path.to_string()),
        None => file_path.to_string(),
    }
}
