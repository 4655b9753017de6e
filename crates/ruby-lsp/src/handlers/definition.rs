//! `textDocument/definition`

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

use crate::handlers::{position_from_params, resolve_entries, uri_from_params, word_at};
use crate::server::Server;

pub fn handle(server: &Server, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let Some(params) = params else { return Ok(json!([])) };
    let uri = uri_from_params(&params)?;
    let Some(position) = position_from_params(&params) else { return Ok(json!([])) };
    let Some(document) = server.documents.get(&uri) else { return Ok(json!([])) };

    let word = word_at(&document, position);
    if word.is_empty() {
        return Ok(json!([]));
    }

    let entries = resolve_entries(&server.index, server.workspace_root.as_deref(), &word);
    let locations: Vec<Value> = entries
        .iter()
        .map(|entry| {
            let line = entry.line.saturating_sub(1);
            json!({
                "uri": ruby_lsp_uri::fs_path_to_uri(&entry.file_path).unwrap_or_else(|_| entry.file_path.clone()),
                "range": {
                    "start": { "line": line, "character": entry.character },
                    "end": { "line": line, "character": entry.name_end_character() }
                }
            })
        })
        .collect();

    Ok(Value::Array(locations))
}
