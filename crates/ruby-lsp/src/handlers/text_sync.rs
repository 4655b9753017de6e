//! `textDocument/{didOpen,didChange,didClose,didSave}`
//!
//! These are notifications: they never produce a response, only mutate
//! server state. `didSave` kicks off a background re-index of the saved
//! file so renamed or newly-added symbols show up without a full rescan.

use ruby_lsp_document::{Document, Edit, LanguageId};
use ruby_lsp_position::{Position, Range};
use ruby_lsp_uri::uri_to_fs_path;
use serde_json::Value;

use crate::server::Server;

pub fn did_open(server: &mut Server, params: Option<Value>) {
    let Some(params) = params else { return };
    let Some(text_document) = params.get("textDocument") else { return };
    let (Some(uri), Some(text)) = (
        text_document.get("uri").and_then(|v| v.as_str()),
        text_document.get("text").and_then(|v| v.as_str()),
    ) else {
        return;
    };
    let version = text_document.get("version").and_then(|v| v.as_i64()).unwrap_or(1);
    let language_id = text_document
        .get("languageId")
        .and_then(|v| v.as_str())
        .map(LanguageId::from_str_or_default)
        .unwrap_or(LanguageId::Ruby);

    server.documents.set(Document::new(uri, text, version, language_id));
}

pub fn did_change(server: &mut Server, params: Option<Value>) {
    let Some(params) = params else { return };
    let Some(uri) = params.get("textDocument").and_then(|td| td.get("uri")).and_then(|u| u.as_str()) else {
        return;
    };
    let Some(changes) = params.get("contentChanges").and_then(|c| c.as_array()) else { return };

    let edits: Vec<Edit> = changes.iter().filter_map(parse_content_change).collect();
    if edits.is_empty() {
        return;
    }

    server.documents.update_with(uri, |document| document.update(&edits));
}

pub fn did_close(server: &mut Server, params: Option<Value>) {
    let Some(params) = params else { return };
    if let Some(uri) = params.get("textDocument").and_then(|td| td.get("uri")).and_then(|u| u.as_str()) {
        server.documents.delete(uri);
    }
}

pub fn did_save(server: &mut Server, params: Option<Value>) {
    let Some(params) = params else { return };
    let Some(uri) = params.get("textDocument").and_then(|td| td.get("uri")).and_then(|u| u.as_str()) else {
        return;
    };
    let Some(document) = server.documents.get(uri) else { return };
    let Some(path) = uri_to_fs_path(uri) else { return };

    server.start_file_reindex(path.to_string_lossy().to_string(), document.text().to_string());
}

fn parse_content_change(change: &Value) -> Option<Edit> {
    let new_text = change.get("text")?.as_str()?.to_string();
    let range = match change.get("range") {
        None | Some(Value::Null) => None,
        Some(range) => Some(Range::new(parse_position(range.get("start")?)?, parse_position(range.get("end")?)?)),
    };
    Some(Edit { range, new_text })
}

fn parse_position(value: &Value) -> Option<Position> {
    let line = value.get("line")?.as_u64()?;
    let character = value.get("character")?.as_u64()?;
    Some(Position::new(line as u32, character as u32))
}
