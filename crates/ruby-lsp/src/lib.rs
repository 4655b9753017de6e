//! A Language Server Protocol backend for Ruby source trees, Rails-aware.
//!
//! The server is a single-threaded reader loop (see [`Server::serve`]) that
//! dispatches JSON-RPC requests to feature handlers. Long-running work
//! (initial workspace indexing, per-file re-indexing on save) runs on
//! detached `std::thread::spawn` tasks so the reader is never blocked.

mod config;
mod dispatch;
mod error;
mod handlers;
mod server;

pub use config::ServerConfig;
pub use error::ServerError;
pub use server::Server;
