//! Unified Ruby symbol taxonomy for LSP tooling.
//!
//! A single, authoritative definition of what a "definition site" is, shared
//! by the extractor, the workspace index, and every feature handler. Keeping
//! this in its own crate means the extractor and the index never drift on
//! what a `SymbolKind` variant means or how it maps to LSP's integer kinds.

use serde::{Deserialize, Serialize};

/// The kind of definition a [`SymbolEntry`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Module,
    InstanceMethod,
    SingletonMethod,
    Constant,
    Scope,
    Association,
    AttrAccessor,
}

impl SymbolKind {
    /// LSP `CompletionItemKind` for this symbol kind, per the mapping table
    /// in the completion feature handler's contract.
    pub const fn to_completion_kind(self) -> i32 {
        match self {
            SymbolKind::Class => 7,
            SymbolKind::Module => 9,
            SymbolKind::InstanceMethod | SymbolKind::SingletonMethod => 2,
            SymbolKind::Constant => 21,
            SymbolKind::Scope => 2,
            SymbolKind::Association => 5,
            SymbolKind::AttrAccessor => 10,
        }
    }

    /// LSP `SymbolKind` for `documentSymbol`/`workspaceSymbol` results.
    pub const fn to_document_symbol_kind(self) -> i32 {
        match self {
            SymbolKind::Class => 5,
            SymbolKind::Module => 2,
            SymbolKind::InstanceMethod | SymbolKind::SingletonMethod => 6,
            SymbolKind::Constant => 14,
            SymbolKind::Scope => 6,
            SymbolKind::Association => 7,
            SymbolKind::AttrAccessor => 7,
        }
    }

    /// Short lowercase label used in hover text (`"class"`,
    /// `"instance_method"`, ...).
    pub const fn label(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Module => "module",
            SymbolKind::InstanceMethod => "instance_method",
            SymbolKind::SingletonMethod => "singleton_method",
            SymbolKind::Constant => "constant",
            SymbolKind::Scope => "scope",
            SymbolKind::Association => "association",
            SymbolKind::AttrAccessor => "attr_accessor",
        }
    }

    /// Label used in completion `detail` strings. Collapses instance and
    /// singleton methods to `"method"`, matching the completion kind mapping
    /// collapsing both to the same LSP `CompletionItemKind`.
    pub const fn completion_label(self) -> &'static str {
        match self {
            SymbolKind::InstanceMethod | SymbolKind::SingletonMethod => "method",
            other => other.label(),
        }
    }
}

/// Method/constant visibility as tracked by the extractor's visibility
/// modifier state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

/// One definition site found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// The short identifier as written (`"full_name"`, `"User"`).
    pub name: String,
    /// The dotted/scoped form built by the extractor (`"User#full_name"`).
    pub fully_qualified_name: String,
    pub kind: SymbolKind,
    pub file_path: String,
    /// 1-based line number.
    pub line: u32,
    /// 0-based column of the definition keyword's identifier.
    pub character: u32,
    /// Enclosing class/module scope joined by `::`, empty if top-level.
    pub parent: String,
    pub visibility: Visibility,
    /// Kind-specific extra: superclass for classes, association form for
    /// associations, accessor form for attrs.
    pub detail: String,
}

impl SymbolEntry {
    /// End column of the name span on the definition line, i.e.
    /// `character + len(name)` in code points.
    pub fn name_end_character(&self) -> u32 {
        self.character + self.name.chars().count() as u32
    }
}
