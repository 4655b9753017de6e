//! `textDocument/rename`
//!
//! Renaming across the heuristic symbol index risks corrupting files this
//! backend never parsed into a real AST, so this handler never edits
//! anything: it always answers with an empty result.

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

pub fn handle() -> Result<Value, JsonRpcError> {
    Ok(json!([]))
}
