//! Workspace-wide symbol index and the Rails convention resolver.
//!
//! [`WorkspaceIndex`] builds once from a full filesystem walk and is updated
//! incrementally as files are saved. It holds two reverse maps over the same
//! `SymbolEntry` data—by name and by file—so that name lookups and
//! per-document symbol queries are both O(1) on the map access.
//! [`resolve_by_convention`] covers the case a name lookup misses: Rails
//! class/module names map onto file paths by a fixed naming convention, and
//! this module probes for them directly.

mod convention;
mod workspace_index;

pub use convention::resolve_by_convention;
pub use workspace_index::WorkspaceIndex;

/// Directory basenames the initial walk never descends into.
pub const SKIP_DIRS: &[&str] =
    &["vendor", "node_modules", ".git", "tmp", "log", ".bundle", "coverage", "public", "storage"];
