//! `textDocument/completion`

use std::collections::HashSet;

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

use crate::handlers::{position_from_params, uri_from_params, word_at};
use crate::server::Server;

const COMPLETION_CAP: usize = 50;

pub fn handle(server: &Server, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let Some(params) = params else { return Ok(empty_result(false)) };
    let uri = uri_from_params(&params)?;
    let Some(position) = position_from_params(&params) else { return Ok(empty_result(false)) };
    let Some(document) = server.documents.get(&uri) else { return Ok(empty_result(false)) };

    let word = word_at(&document, position);
    if word.chars().count() < 2 {
        return Ok(empty_result(false));
    }

    let mut seen = HashSet::new();
    let mut items = Vec::new();
    let mut is_incomplete = false;

    for entry in server.index.prefix_search(&word) {
        if !seen.insert(entry.name.clone()) {
            continue;
        }
        if items.len() >= COMPLETION_CAP {
            is_incomplete = true;
            break;
        }
        let detail = if entry.parent.is_empty() {
            entry.kind.completion_label().to_string()
        } else {
            format!("{} in {}", entry.kind.completion_label(), entry.parent)
        };
        items.push(json!({
            "label": entry.name,
            "kind": entry.kind.to_completion_kind(),
            "detail": detail,
        }));
    }

    Ok(json!({ "isIncomplete": is_incomplete, "items": items }))
}

fn empty_result(is_incomplete: bool) -> Value {
    json!({ "isIncomplete": is_incomplete, "items": [] })
}
