//! `workspace/symbol`

use ruby_lsp_protocol::JsonRpcError;
use ruby_lsp_symbols::SymbolEntry;
use serde_json::{json, Value};

use crate::handlers::relative_path;
use crate::server::Server;

const WORKSPACE_SYMBOL_CAP: usize = 50;

pub fn handle(server: &Server, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let Some(params) = params else { return Ok(json!([])) };
    let query = params.get("query").and_then(|q| q.as_str()).unwrap_or("");
    if query.chars().count() < 2 {
        return Ok(json!([]));
    }

    let entries = server.index.prefix_search(query);
    let symbols: Vec<Value> = entries
        .into_iter()
        .take(WORKSPACE_SYMBOL_CAP)
        .map(|entry| to_symbol_information(&entry, server.workspace_root.as_deref()))
        .collect();

    Ok(Value::Array(symbols))
}

fn to_symbol_information(entry: &SymbolEntry, workspace_root: Option<&std::path::Path>) -> Value {
    let line = entry.line.saturating_sub(1);
    json!({
        "name": entry.fully_qualified_name,
        "kind": entry.kind.to_document_symbol_kind(),
        "containerName": relative_path(workspace_root, &entry.file_path),
        "location": {
            "uri": ruby_lsp_uri::fs_path_to_uri(&entry.file_path).unwrap_or_else(|_| entry.file_path.clone()),
            "range": {
                "start": { "line": line, "character": entry.character },
                "end": { "line": line, "character": entry.name_end_character() }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        let mut file = std::fs::File::create(path).expect("create");
        file.write_all(content.as_bytes()).expect("write");
    }

    #[test]
    fn rejects_short_queries() {
        let server = Server::new(Box::new(Vec::new()));
        let params = json!({ "query": "a" });
        let result = handle(&server, Some(params)).expect("ok");
        assert_eq!(result, json!([]));
    }

    #[test]
    fn returns_fully_qualified_names_with_container() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "app/models/user.rb", "class User\n  def full_name\n  end\nend\n");

        let mut server = Server::new(Box::new(Vec::new()));
        server.index.build(dir.path());
        server.workspace_root = Some(dir.path().to_path_buf());

        let params = json!({ "query": "full" });
        let result = handle(&server, Some(params)).expect("ok");
        let symbols = result.as_array().expect("array");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0]["name"], "User#full_name");
        assert_eq!(symbols[0]["containerName"], "app/models/user.rb");
    }
}
