//! `textDocument/documentSymbol`

use ruby_lsp_protocol::JsonRpcError;
use ruby_lsp_symbols::{SymbolEntry, SymbolKind};
use ruby_lsp_uri::uri_to_fs_path;
use serde_json::{json, Value};

use crate::handlers::uri_from_params;
use crate::server::Server;

pub fn handle(server: &Server, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let Some(params) = params else { return Ok(json!([])) };
    let uri = uri_from_params(&params)?;

    let Some(path) = uri_to_fs_path(&uri) else { return Ok(json!([])) };
    let file_path = path.to_string_lossy().to_string();

    let mut entries = server.index.file_symbols(&file_path);
    if entries.is_empty() {
        if let Some(document) = server.documents.get(&uri) {
            entries = ruby_lsp_extractor::extract(&file_path, document.text())
                .into_iter()
                .filter(|e| matches!(e.kind, SymbolKind::Class | SymbolKind::Module | SymbolKind::InstanceMethod | SymbolKind::SingletonMethod))
                .collect();
        }
    }

    Ok(Value::Array(entries.iter().map(to_document_symbol).collect()))
}

fn to_document_symbol(entry: &SymbolEntry) -> Value {
    let line = entry.line.saturating_sub(1);
    let range = json!({
        "start": { "line": line, "character": entry.character },
        "end": { "line": line, "character": entry.name_end_character() }
    });
    json!({
        "name": entry.name,
        "kind": entry.kind.to_document_symbol_kind(),
        "range": range,
        "selectionRange": range,
    })
}
