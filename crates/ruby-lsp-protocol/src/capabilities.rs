//! The server's fixed `initialize` capability response.
//!
//! Unlike a general-purpose language server, this backend advertises a
//! small, unconditional set of capabilities rather than gating them behind
//! build-time feature flags: every handler it advertises exists, even the
//! ones that are deliberate no-ops (formatting, references, rename,
//! highlight, folding, code actions return empty results rather than being
//! omitted from capability negotiation).

use serde_json::{json, Value};

/// Build the `InitializeResult.capabilities` object, plus `serverInfo`.
pub fn server_capabilities() -> Value {
    json!({
        "capabilities": {
            "textDocumentSync": {
                "openClose": true,
                "change": 2,
                "save": { "includeText": false }
            },
            "completionProvider": {
                "triggerCharacters": [".", ":", "@"]
            },
            "hoverProvider": true,
            "definitionProvider": true,
            "referencesProvider": true,
            "renameProvider": true,
            "documentSymbolProvider": true,
            "workspaceSymbolProvider": true,
            "documentFormattingProvider": true,
            "documentHighlightProvider": true,
            "foldingRangeProvider": true,
            "codeActionProvider": {
                "codeActionKinds": ["quickfix", "refactor"]
            }
        },
        "serverInfo": {
            "name": "Ruby LSP Go",
            "version": "1.2.0"
        }
    })
}
