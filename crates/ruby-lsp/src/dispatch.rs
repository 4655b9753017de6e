//! JSON-RPC method routing.
//!
//! A single-threaded reader dispatches on `method`. Requests arriving before
//! `initialize` (other than `initialize` itself) get `ServerNotInitialized`.
//! An unrecognized method produces no response at all — per the protocol
//! error taxonomy, it's treated as protocol-level lateness, not an error.

use ruby_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};

use crate::error::ServerError;
use crate::handlers;
use crate::server::Server;

impl Server {
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        if request.method == "$/cancelRequest" {
            if let Some(cancel_id) = request.params.as_ref().and_then(|p| p.get("id")).cloned() {
                self.cancel_mark(&cancel_id);
            }
            return None;
        }

        if let Some(ref request_id) = id {
            if self.is_cancelled(request_id) {
                self.cancel_clear(request_id);
                return None;
            }
        }

        if self.shutdown_received && request.method != "exit" {
            return id.map(|id| JsonRpcResponse::error(Some(id), ServerError::ShuttingDown.into()));
        }

        let known_before_init = matches!(request.method.as_str(), "initialize" | "shutdown" | "exit");
        if !self.initialized && !known_before_init {
            return id.map(|id| JsonRpcResponse::error(Some(id), ServerError::NotInitialized.into()));
        }

        let result = match request.method.as_str() {
            "initialize" => Some(handlers::lifecycle::initialize(self, request.params)),
            "initialized" => {
                handlers::lifecycle::initialized(self);
                None
            }
            "shutdown" => Some(handlers::lifecycle::shutdown(self)),
            "exit" => handlers::lifecycle::exit(self), // diverges: never returns

            "textDocument/didOpen" => {
                handlers::text_sync::did_open(self, request.params);
                None
            }
            "textDocument/didChange" => {
                handlers::text_sync::did_change(self, request.params);
                None
            }
            "textDocument/didClose" => {
                handlers::text_sync::did_close(self, request.params);
                None
            }
            "textDocument/didSave" => {
                handlers::text_sync::did_save(self, request.params);
                None
            }

            "textDocument/definition" => Some(handlers::definition::handle(self, request.params)),
            "textDocument/hover" => Some(handlers::hover::handle(self, request.params)),
            "textDocument/completion" => Some(handlers::completion::handle(self, request.params)),
            "textDocument/documentSymbol" => Some(handlers::document_symbol::handle(self, request.params)),
            "textDocument/formatting" => Some(handlers::formatting::handle()),
            "textDocument/references" => Some(handlers::references::handle()),
            "textDocument/rename" => Some(handlers::rename::handle()),
            "textDocument/documentHighlight" => Some(handlers::document_highlight::handle()),
            "textDocument/foldingRange" => Some(handlers::folding_range::handle()),
            "textDocument/codeAction" => Some(handlers::code_action::handle()),
            "workspace/symbol" => Some(handlers::workspace_symbol::handle(self, request.params)),

            _ => {
                tracing::debug!(method = %request.method, "unrecognized method, no response");
                None
            }
        }?;

        let id = id?;
        Some(match result {
            Ok(value) => JsonRpcResponse::success(Some(id), value),
            Err(error) => JsonRpcResponse::error(Some(id), error),
        })
    }
}
