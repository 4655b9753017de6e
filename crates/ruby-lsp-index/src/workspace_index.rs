use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use ruby_lsp_symbols::SymbolEntry;
use walkdir::WalkDir;

use crate::SKIP_DIRS;

/// The two reverse maps, held behind a single lock so a writer's removal and
/// insertion phases for one file are never split by a reader.
#[derive(Default)]
struct Tables {
    by_name: HashMap<String, Vec<SymbolEntry>>,
    by_file: HashMap<String, Vec<SymbolEntry>>,
}

/// Workspace-wide index of Ruby definition sites.
///
/// Holds the same `SymbolEntry` data under two reverse maps: `by_name` for
/// name-based lookup (`definition`, `completion`, `workspaceSymbol`) and
/// `by_file` for per-document lookup (`documentSymbol`). Both maps live
/// behind one `RwLock`, so a writer's remove-then-insert for a single file
/// (`update_file`) is never observed as a partial update: a concurrent
/// reader sees either all of the file's prior entries or all of its new
/// ones, never neither.
///
/// # Examples
///
/// ```
/// use ruby_lsp_index::WorkspaceIndex;
///
/// let index = WorkspaceIndex::new();
/// assert!(!index.is_ready());
/// assert!(index.lookup("User").is_empty());
/// ```
pub struct WorkspaceIndex {
    tables: RwLock<Tables>,
    ready: Arc<std::sync::atomic::AtomicBool>,
}

impl Default for WorkspaceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceIndex {
    pub fn new() -> Self {
        Self { tables: RwLock::new(Tables::default()), ready: Arc::new(std::sync::atomic::AtomicBool::new(false)) }
    }

    /// Walk `root`, pruning [`SKIP_DIRS`], extracting symbols from every
    /// `.rb` file found, and merging them into both maps. Unreadable files
    /// are logged and skipped; the walk always completes. Sets `ready` once
    /// done.
    pub fn build(&self, root: &Path) {
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map(|name| !SKIP_DIRS.contains(&name))
                .unwrap_or(true)
        });

        for entry in walker.filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("rb") {
                continue;
            }

            let path = entry.path();
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    let file_path = path.to_string_lossy().to_string();
                    let entries = ruby_lsp_extractor::extract(&file_path, &text);
                    insert_file(&mut self.tables.write(), &file_path, entries);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable file during workspace scan");
                }
            }
        }

        self.ready.store(true, std::sync::atomic::Ordering::Relaxed);
    }

    /// Re-extract `file_path` and atomically replace its entries in both
    /// maps. Removal and insertion happen under a single write guard, so a
    /// concurrent reader never observes the file's prior entries gone with
    /// its new entries not yet in place.
    pub fn update_file(&self, file_path: &str, text: &str) {
        let entries = ruby_lsp_extractor::extract(file_path, text);
        let mut tables = self.tables.write();
        remove_file(&mut tables, file_path);
        insert_file(&mut tables, file_path, entries);
    }

    /// Exact match against `by_name`.
    pub fn lookup(&self, name: &str) -> Vec<SymbolEntry> {
        self.tables.read().by_name.get(name).cloned().unwrap_or_default()
    }

    /// Case-insensitive prefix match over every key in `by_name`,
    /// deduplicated by `(file_path, line, name)`. Result order is
    /// unspecified.
    pub fn prefix_search(&self, prefix: &str) -> Vec<SymbolEntry> {
        let prefix_lower = prefix.to_lowercase();
        let mut seen = std::collections::HashSet::new();
        let mut results = Vec::new();

        for (name, entries) in self.tables.read().by_name.iter() {
            if !name.to_lowercase().starts_with(&prefix_lower) {
                continue;
            }
            for entry in entries {
                let key = (entry.file_path.clone(), entry.line, entry.name.clone());
                if seen.insert(key) {
                    results.push(entry.clone());
                }
            }
        }

        results
    }

    /// Exact lookup in `by_file`.
    pub fn file_symbols(&self, file_path: &str) -> Vec<SymbolEntry> {
        self.tables.read().by_file.get(file_path).cloned().unwrap_or_default()
    }

    /// Whether the initial scan has completed. This is an unsynchronized
    /// hint; callers must not assume completeness, only freshness.
    pub fn is_ready(&self) -> bool {
        self.ready.load(std::sync::atomic::Ordering::Relaxed)
    }
}

fn insert_file(tables: &mut Tables, file_path: &str, entries: Vec<SymbolEntry>) {
    if entries.is_empty() {
        return;
    }

    for entry in &entries {
        tables.by_name.entry(entry.name.clone()).or_default().push(entry.clone());
        if entry.fully_qualified_name != entry.name {
            tables.by_name.entry(entry.fully_qualified_name.clone()).or_default().push(entry.clone());
        }
    }

    tables.by_file.insert(file_path.to_string(), entries);
}

fn remove_file(tables: &mut Tables, file_path: &str) {
    tables.by_name.retain(|_, entries| {
        entries.retain(|e| e.file_path != file_path);
        !entries.is_empty()
    });
    tables.by_file.remove(file_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        let mut file = std::fs::File::create(path).expect("create");
        file.write_all(content.as_bytes()).expect("write");
    }

    #[test]
    fn build_indexes_rb_files_and_sets_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "app/models/user.rb", "class User\n  def full_name\n  end\nend\n");

        let index = WorkspaceIndex::new();
        assert!(!index.is_ready());
        index.build(dir.path());
        assert!(index.is_ready());

        let entries = index.lookup("User");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ruby_lsp_symbols::SymbolKind::Class);
    }

    #[test]
    fn build_skips_vendored_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "vendor/bundle/gem.rb", "class Ignored\nend\n");
        write_file(dir.path(), "app/models/user.rb", "class User\nend\n");

        let index = WorkspaceIndex::new();
        index.build(dir.path());

        assert!(index.lookup("Ignored").is_empty());
        assert!(!index.lookup("User").is_empty());
    }

    #[test]
    fn update_file_replaces_prior_entries_only_for_that_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "app/models/user.rb", "class User\nend\n");
        write_file(dir.path(), "app/models/post.rb", "class Post\nend\n");

        let index = WorkspaceIndex::new();
        index.build(dir.path());

        let user_path = dir.path().join("app/models/user.rb").to_string_lossy().to_string();
        index.update_file(&user_path, "class User\n  def renamed\n  end\nend\n");

        assert!(index.lookup("User").len() == 1);
        assert!(!index.lookup("Post").is_empty());
        let file_entries = index.file_symbols(&user_path);
        assert!(file_entries.iter().any(|e| e.name == "renamed"));
    }

    #[test]
    fn update_file_removing_all_symbols_deletes_empty_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "app/models/user.rb", "class User\nend\n");

        let index = WorkspaceIndex::new();
        index.build(dir.path());

        let user_path = dir.path().join("app/models/user.rb").to_string_lossy().to_string();
        index.update_file(&user_path, "# nothing to see here\n");

        assert!(index.lookup("User").is_empty());
        assert!(index.file_symbols(&user_path).is_empty());
    }

    #[test]
    fn lookup_by_fully_qualified_name_finds_nested_method() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "app/models/user.rb", "class User\n  def full_name\n  end\nend\n");

        let index = WorkspaceIndex::new();
        index.build(dir.path());

        assert_eq!(index.lookup("full_name").len(), 1);
        let by_fqn = index.lookup("User#full_name");
        assert_eq!(by_fqn.len(), 1);
        assert_eq!(by_fqn[0].name, "full_name");
    }

    #[test]
    fn prefix_search_is_case_insensitive_and_deduplicates() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "app/models/user.rb", "class User\nend\n");
        write_file(dir.path(), "app/models/user_profile.rb", "class UserProfile\nend\n");

        let index = WorkspaceIndex::new();
        index.build(dir.path());

        let results = index.prefix_search("us");
        assert_eq!(results.len(), 2);
    }
}
