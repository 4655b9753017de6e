//! `textDocument/formatting`
//!
//! Formatting is delegated to external tools (rubocop, standardrb) that the
//! client invokes directly; this server never rewrites a buffer itself.

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

pub fn handle() -> Result<Value, JsonRpcError> {
    Ok(json!([]))
}
