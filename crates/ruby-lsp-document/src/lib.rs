//! In-memory document buffers and the concurrent document store.
//!
//! `Document` applies incremental edit batches in reverse order of
//! appearance, per the LSP incremental-sync contract this backend follows.
//! `DocumentStore` is a thin `RwLock`-guarded map from URI to `Document`,
//! the same shape as this workspace's `perl-workspace-index::DocumentStore`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use ruby_lsp_position::{LineIndex, Position, Range};
use serde::{Deserialize, Serialize};

/// The language of an open document, as reported by `didOpen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageId {
    Ruby,
    Erb,
    Rbs,
}

impl LanguageId {
    /// Parse the `languageId` field sent by the client. Unrecognized values
    /// default to `Ruby` rather than rejecting the `didOpen`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "erb" => LanguageId::Erb,
            "rbs" => LanguageId::Rbs,
            _ => LanguageId::Ruby,
        }
    }
}

/// One incremental change, as sent in a `textDocument/didChange` batch.
///
/// `range: None` signals a whole-buffer replace (the client sent full-text
/// sync for this change instead of a range).
#[derive(Debug, Clone)]
pub struct Edit {
    pub range: Option<Range>,
    pub new_text: String,
}

/// An open text buffer with incremental edit support and position mapping.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: String,
    pub version: i64,
    pub language_id: LanguageId,
    text: String,
    line_index: LineIndex,
}

impl Document {
    pub fn new(uri: impl Into<String>, text: impl Into<String>, version: i64, language_id: LanguageId) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self { uri: uri.into(), version, language_id, text, line_index }
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply a batch of edits. Edits are applied in reverse order of
    /// appearance so that each earlier edit's range is still valid against
    /// the buffer as it stands when its turn comes. `version` advances by
    /// exactly one regardless of batch size.
    pub fn update(&mut self, edits: &[Edit]) {
        let mut chars: Vec<char> = self.text.chars().collect();

        for edit in edits.iter().rev() {
            match &edit.range {
                None => {
                    chars = edit.new_text.chars().collect();
                }
                Some(range) => {
                    let current: String = chars.iter().collect();
                    let index = LineIndex::new(&current);
                    let mut start = index.position_to_offset(range.start).min(chars.len());
                    let mut end = index.position_to_offset(range.end).min(chars.len());
                    if start > end {
                        std::mem::swap(&mut start, &mut end);
                    }
                    let replacement: Vec<char> = edit.new_text.chars().collect();
                    chars.splice(start..end, replacement);
                }
            }
        }

        self.text = chars.into_iter().collect();
        self.line_index = LineIndex::new(&self.text);
        self.version += 1;
    }

    /// Convert a position to a code-point offset, clamped to the buffer.
    pub fn position_to_offset(&self, pos: Position) -> usize {
        self.line_index.position_to_offset(pos)
    }

    /// The position just past the last code point in the buffer.
    pub fn end_position(&self) -> Position {
        self.line_index.end_position()
    }

    /// The content of a single line, without its trailing newline. Returns
    /// `None` for an out-of-range line.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.text.lines().nth(line as usize)
    }

    /// Number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }
}

/// A thread-safe map from document URI to `Document`.
///
/// Readers (`get`, `each`, `keys`) may proceed concurrently with each other;
/// writers (`set`, `delete`, `clear`) are exclusive.
#[derive(Clone, Default)]
pub struct DocumentStore {
    documents: Arc<RwLock<HashMap<String, Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self { documents: Arc::new(RwLock::new(HashMap::new())) }
    }

    fn key(uri: &str) -> String {
        ruby_lsp_uri::uri_key(uri)
    }

    /// Insert or replace the document at `uri`.
    pub fn set(&self, document: Document) {
        let key = Self::key(&document.uri);
        self.documents.write().insert(key, document);
    }

    /// Look up the document at `uri`.
    pub fn get(&self, uri: &str) -> Option<Document> {
        self.documents.read().get(&Self::key(uri)).cloned()
    }

    /// Mutate the document at `uri` in place via `f`, if it's open.
    /// Returns `false` if no document is open at `uri`.
    pub fn update_with(&self, uri: &str, f: impl FnOnce(&mut Document)) -> bool {
        let mut docs = self.documents.write();
        match docs.get_mut(&Self::key(uri)) {
            Some(doc) => {
                f(doc);
                true
            }
            None => false,
        }
    }

    /// Remove the document at `uri`. Returns `true` if it was open.
    pub fn delete(&self, uri: &str) -> bool {
        self.documents.write().remove(&Self::key(uri)).is_some()
    }

    /// Remove every open document.
    pub fn clear(&self) {
        self.documents.write().clear();
    }

    /// All open document URIs.
    pub fn keys(&self) -> Vec<String> {
        self.documents.read().keys().cloned().collect()
    }

    /// Visit every open document under a single read guard. The visitor
    /// must not attempt to mutate the store.
    pub fn each(&self, mut visitor: impl FnMut(&Document)) {
        let docs = self.documents.read();
        for doc in docs.values() {
            visitor(doc);
        }
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}
