//! `textDocument/hover`

use ruby_lsp_protocol::JsonRpcError;
use ruby_lsp_symbols::SymbolEntry;
use ruby_lsp_symbols::SymbolKind;
use serde_json::{json, Value};

use crate::handlers::{position_from_params, relative_path, resolve_entries, uri_from_params, word_at};
use crate::server::Server;

pub fn handle(server: &Server, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let Some(params) = params else { return Ok(Value::Null) };
    let uri = uri_from_params(&params)?;
    let Some(position) = position_from_params(&params) else { return Ok(Value::Null) };
    let Some(document) = server.documents.get(&uri) else { return Ok(Value::Null) };

    let word = word_at(&document, position);
    if word.is_empty() {
        return Ok(Value::Null);
    }

    let entries = resolve_entries(&server.index, server.workspace_root.as_deref(), &word);
    if entries.is_empty() {
        return Ok(Value::Null);
    }

    let blocks: Vec<String> =
        entries.iter().map(|entry| render_block(entry, server.workspace_root.as_deref())).collect();

    Ok(json!({
        "contents": { "kind": "markdown", "value": blocks.join("\n\n---\n\n") }
    }))
}

fn render_block(entry: &SymbolEntry, workspace_root: Option<&std::path::Path>) -> String {
    let preamble = format!("```ruby\n{} {}\n```", entry.kind.label(), entry.fully_qualified_name);
    let defined_in = format!("Defined in: {}:{}", relative_path(workspace_root, &entry.file_path), entry.line);
    let mut lines = vec![preamble, defined_in];

    if let Some(extra) = extra_line(entry) {
        lines.push(extra);
    }

    lines.join("\n\n")
}

fn extra_line(entry: &SymbolEntry) -> Option<String> {
    match entry.kind {
        SymbolKind::Class if !entry.detail.is_empty() => Some(format!("Superclass: `{}`", entry.detail)),
        SymbolKind::Association => Some(format!("Association type: {}", entry.detail)),
        SymbolKind::AttrAccessor => Some(format!("Accessor: `{}`", entry.detail)),
        SymbolKind::Scope => Some("Rails named scope.".to_string()),
        _ => None,
    }
}
