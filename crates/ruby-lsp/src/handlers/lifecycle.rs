//! `initialize`, `initialized`, `shutdown`, `exit`.

use ruby_lsp_protocol::JsonRpcError;
use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::server::Server;

pub fn initialize(server: &mut Server, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let root_uri = params.as_ref().and_then(|p| p.get("rootUri")).and_then(|v| v.as_str());
    let root_path = params.as_ref().and_then(|p| p.get("rootPath")).and_then(|v| v.as_str());
    let workspace_uri = ruby_lsp_uri::resolve_workspace_uri(root_uri, root_path);

    server.workspace_root = ruby_lsp_uri::uri_to_fs_path(&workspace_uri);
    server.config = ServerConfig::from_initialization_options(
        params.as_ref().and_then(|p| p.get("initializationOptions")),
    );
    server.start_background_index();

    Ok(ruby_lsp_protocol::server_capabilities())
}

pub fn initialized(server: &mut Server) {
    tracing::debug!("ruby-lsp: client confirmed initialization");
    server.initialized = true;
}

pub fn shutdown(server: &mut Server) -> Result<Value, JsonRpcError> {
    server.shutdown_received = true;
    server.drain_background_tasks();
    Ok(Value::Null)
}

/// Per the base protocol, `exit` terminates the process immediately: status
/// 0 if `shutdown` was received first, 1 otherwise.
pub fn exit(server: &mut Server) -> ! {
    let status = if server.shutdown_received { 0 } else { 1 };
    std::process::exit(status);
}
