//! `textDocument/documentHighlight`

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

pub fn handle() -> Result<Value, JsonRpcError> {
    Ok(json!([]))
}
