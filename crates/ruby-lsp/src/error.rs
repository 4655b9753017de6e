//! Error taxonomy for the server's internal operations.
//!
//! Per the error-handling design, almost nothing here is fatal: transport
//! and filesystem failures are logged and the affected operation is
//! skipped. `ServerError` exists for the handful of cases that do need to
//! surface as a typed JSON-RPC error response.

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("server has not received 'initialize' yet")]
    NotInitialized,

    #[error("server has received 'shutdown', no further requests are served")]
    ShuttingDown,

    #[error("invalid parameters for '{method}': {reason}")]
    InvalidParams { method: String, reason: String },
}

impl ServerError {
    pub fn code(&self) -> i32 {
        match self {
            ServerError::NotInitialized => ruby_lsp_protocol::error_codes::SERVER_NOT_INITIALIZED,
            ServerError::ShuttingDown => ruby_lsp_protocol::error_codes::INVALID_REQUEST,
            ServerError::InvalidParams { .. } => ruby_lsp_protocol::error_codes::INVALID_PARAMS,
        }
    }
}

impl From<ServerError> for ruby_lsp_protocol::JsonRpcError {
    fn from(error: ServerError) -> Self {
        ruby_lsp_protocol::JsonRpcError::new(error.code(), error.to_string())
    }
}
