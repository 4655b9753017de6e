use std::path::Path;

use ruby_lsp_symbols::{SymbolEntry, SymbolKind, Visibility};
use walkdir::WalkDir;

/// Directories probed, in order, for a Rails-convention file name `S.rb`.
const CONVENTION_DIRS: &[&str] = &[
    "app/models",
    "app/controllers",
    "app/services",
    "app/serializers",
    "app/jobs",
    "app/mailers",
    "app/helpers",
    "app/workers",
    "app/policies",
    "app/forms",
    "app/decorators",
    "app/validators",
    "app/interactors",
    "app/operations",
    "lib",
    "app/models/concerns",
    "app/controllers/concerns",
];

/// Deepest a recursive `app/**/S.rb` fallback glob will descend, counted
/// from `app/` itself. Bounds worst-case directory-tree walks on workspaces
/// with unusually deep `app/` nesting.
const GLOB_MAX_DEPTH: usize = 8;

/// Resolve `name` (a bare or `::`-qualified constant, e.g. `UserController`
/// or `Admin::UsersController`) against Rails' directory convention, probing
/// the fixed list of `app/*` directories under `root` before falling back to
/// a recursive search under `app/`.
///
/// Returns one synthetic class-kind [`SymbolEntry`] per convention path that
/// actually exists on disk.
pub fn resolve_by_convention(root: &Path, name: &str) -> Vec<SymbolEntry> {
    let file_stem = to_file_name(name);
    let relative = format!("{file_stem}.rb");

    let mut found = Vec::new();
    for dir in CONVENTION_DIRS {
        let candidate = root.join(dir).join(&relative);
        if candidate.is_file() {
            found.push(synthetic_entry(name, &candidate));
        }
    }

    if !found.is_empty() {
        return found;
    }

    let app_dir = root.join("app");
    let target_name = format!("{file_stem}.rb");
    for entry in WalkDir::new(&app_dir).max_depth(GLOB_MAX_DEPTH).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str() == Some(target_name.as_str()) {
            found.push(synthetic_entry(name, entry.path()));
        }
    }

    found
}

fn synthetic_entry(name: &str, path: &Path) -> SymbolEntry {
    SymbolEntry {
        name: name.to_string(),
        fully_qualified_name: name.to_string(),
        kind: SymbolKind::Class,
        file_path: path.to_string_lossy().to_string(),
        line: 1,
        character: 0,
        parent: String::new(),
        visibility: Visibility::Public,
        detail: String::new(),
    }
}

/// Convert a (possibly `::`-qualified) constant name to its Rails file-name
/// form: `::` becomes `/`, interior camel humps get an underscore, the
/// whole thing is lowercased.
fn to_file_name(name: &str) -> String {
    let slashed = name.replace("::", "/");
    let chars: Vec<char> = slashed.chars().collect();
    let mut result = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let prev_lower = prev.is_lowercase();
            let prev_upper_next_lower = prev.is_uppercase() && next.is_some_and(|n| n.is_lowercase());
            if prev_lower || prev_upper_next_lower {
                result.push('_');
            }
        }
        result.push(c);
    }

    result.to_lowercase()
}
