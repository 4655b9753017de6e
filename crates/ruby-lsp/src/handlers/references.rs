//! `textDocument/references`
//!
//! Cross-file reference search is out of scope for this backend; advertised
//! per spec so clients don't treat the method as unsupported, but always
//! answers with an empty array rather than blocking on a real search.

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

pub fn handle() -> Result<Value, JsonRpcError> {
    Ok(json!([]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_returns_an_empty_array() {
        let result = handle().expect("ok");
        assert_eq!(result, json!([]));
    }
}
