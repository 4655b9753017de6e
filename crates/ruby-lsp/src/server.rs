//! The LSP server: connection state, the reader loop, and cancellation.

use std::collections::HashSet;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use ruby_lsp_document::DocumentStore;
use ruby_lsp_index::WorkspaceIndex;
use ruby_lsp_transport::{log_response, read_message, write_message, ReadOutcome};
use serde_json::Value;

use crate::config::ServerConfig;

/// A connected LSP session: documents, the workspace index, and the
/// lifecycle flags that gate request handling.
pub struct Server {
    pub(crate) documents: DocumentStore,
    pub(crate) index: Arc<WorkspaceIndex>,
    pub(crate) workspace_root: Option<PathBuf>,
    pub(crate) config: ServerConfig,
    pub(crate) cancelled: Mutex<HashSet<Value>>,
    pub(crate) initialized: bool,
    pub(crate) shutdown_received: bool,
    /// Handles for detached background work (initial build, per-file
    /// re-index), joined on `shutdown` so the server drains outstanding
    /// tasks rather than leaking them.
    background_tasks: Mutex<Vec<JoinHandle<()>>>,
    output: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Server {
    /// Build a server that writes responses to `output`.
    pub fn new(output: Box<dyn Write + Send>) -> Self {
        Self {
            documents: DocumentStore::new(),
            index: Arc::new(WorkspaceIndex::new()),
            workspace_root: None,
            config: ServerConfig::default(),
            cancelled: Mutex::new(HashSet::new()),
            initialized: false,
            shutdown_received: false,
            background_tasks: Mutex::new(Vec::new()),
            output: Arc::new(Mutex::new(output)),
        }
    }

    /// Run the server on stdio.
    pub fn run(&mut self) -> io::Result<()> {
        tracing::info!("ruby-lsp: starting on stdio");
        let stdin = io::stdin();
        let mut reader = BufReader::new(stdin.lock());
        self.serve(&mut reader)
    }

    /// Serve requests read from `reader` until EOF. A malformed frame is
    /// logged and skipped; only EOF ends the loop, since the frame's bytes
    /// have already been consumed and the stream is still positioned at the
    /// next frame boundary.
    pub fn serve(&mut self, reader: &mut dyn BufRead) -> io::Result<()> {
        loop {
            match read_message(reader)? {
                ReadOutcome::Message(request) => {
                    tracing::debug!(method = %request.method, "received request");
                    if let Some(response) = self.handle_request(request) {
                        log_response(&response);
                        let mut output = self.output.lock();
                        write_message(&mut *output, &response)?;
                    }
                }
                ReadOutcome::MalformedFrame => continue,
                ReadOutcome::Eof => {
                    tracing::info!("ruby-lsp: EOF, shutting down");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handle one message read from `reader`, used by tests that want to
    /// feed a single framed request without running the full loop.
    pub fn handle_message<R: Read>(&mut self, reader: &mut R) -> io::Result<()> {
        let mut buf_reader = BufReader::new(reader);
        if let ReadOutcome::Message(request) = read_message(&mut buf_reader)? {
            if let Some(response) = self.handle_request(request) {
                log_response(&response);
                let mut output = self.output.lock();
                write_message(&mut *output, &response)?;
            }
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Build the workspace index synchronously against `root`, bypassing the
    /// detached background thread `initialize` normally spawns. Exposed for
    /// integration tests that need the index populated before making
    /// assertions, where the usual fire-and-forget timing isn't acceptable.
    pub fn test_build_index(&mut self, root: &std::path::Path) {
        self.workspace_root = Some(root.to_path_buf());
        self.index.build(root);
    }

    /// Flip the `initialized` flag without spawning the background index
    /// build `initialize` normally triggers. Exposed so integration tests
    /// can combine it with [`Server::test_build_index`] and get a
    /// deterministic, race-free index instead of racing a background scan.
    pub fn test_mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn cancel_mark(&self, id: &Value) {
        self.cancelled.lock().insert(id.clone());
    }

    pub(crate) fn cancel_clear(&self, id: &Value) {
        self.cancelled.lock().remove(id);
    }

    pub(crate) fn is_cancelled(&self, id: &Value) -> bool {
        self.cancelled.lock().contains(id)
    }

    /// Spawn the initial full-workspace scan as a detached background
    /// thread so the reader loop is never blocked by it.
    pub(crate) fn start_background_index(&self) {
        let Some(root) = self.workspace_root.clone() else {
            tracing::warn!("no workspace root resolved, skipping initial index");
            return;
        };
        let index = Arc::clone(&self.index);
        let handle = std::thread::spawn(move || {
            tracing::info!(root = %root.display(), "starting workspace index build");
            index.build(&root);
            tracing::info!("workspace index build complete");
        });
        self.background_tasks.lock().push(handle);
    }

    /// Spawn a re-index of a single file, used after `didSave`.
    pub(crate) fn start_file_reindex(&self, file_path: String, text: String) {
        let index = Arc::clone(&self.index);
        let handle = std::thread::spawn(move || {
            index.update_file(&file_path, &text);
        });
        self.background_tasks.lock().push(handle);
    }

    /// Block until every detached background task (initial build, per-file
    /// re-index) has finished. Called from `shutdown` so the server drains
    /// outstanding work instead of leaking threads past process exit.
    pub(crate) fn drain_background_tasks(&self) {
        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut self.background_tasks.lock());
        for handle in handles {
            let _ = handle.join();
        }
    }
}
