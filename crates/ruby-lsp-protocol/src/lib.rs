//! JSON-RPC 2.0 message types and the server's fixed capability response.

mod capabilities;
mod jsonrpc;

pub use capabilities::server_capabilities;
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Standard JSON-RPC / LSP error codes used by this server.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const SERVER_NOT_INITIALIZED: i32 = -32002;
}
