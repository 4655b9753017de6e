//! `file://` URI <-> filesystem path conversion for the Ruby LSP.
//!
//! Centralizes the URI handling rules spec'd for the workspace: RFC 3986
//! parsing on the way in, and `file://`/`file:///` prefixing on the way out
//! depending on whether the path is absolute.

use url::Url;

/// Convert a `file://` URI to a filesystem path.
///
/// Returns `None` if the URI does not parse or is not a `file://` URI.
pub fn uri_to_fs_path(uri: &str) -> Option<std::path::PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Convert a filesystem path to a `file://` URI.
///
/// Relative paths are resolved against the current working directory first.
/// Absolute paths are prefixed with `file://`; the result is `file:///...`
/// for POSIX-style absolute paths since they already start with `/`.
pub fn fs_path_to_uri<P: AsRef<std::path::Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| format!("failed to get current directory: {e}"))?
            .join(path)
    };

    Url::from_file_path(&abs_path)
        .map(|url| url.to_string())
        .map_err(|_| format!("failed to convert path to URI: {}", abs_path.display()))
}

/// Normalize a URI to a consistent key for use as a `HashMap` lookup key.
///
/// Valid URIs are re-serialized through `Url` for consistent escaping;
/// anything that doesn't parse (e.g. a bare path slipped in by a caller) is
/// returned unchanged rather than rejected, matching the document store's
/// "never fail on a bad URI, just key on it literally" policy.
pub fn uri_key(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(u) => u.as_str().to_string(),
        Err(_) => uri.to_string(),
    }
}

/// True if `uri` uses the `file://` scheme.
pub fn is_file_uri(uri: &str) -> bool {
    uri.starts_with("file://")
}

/// Workspace root URI resolution order: `rootUri`, then `rootPath` (converted
/// to a URI), then `file://$PWD`.
pub fn resolve_workspace_uri(root_uri: Option<&str>, root_path: Option<&str>) -> String {
    if let Some(uri) = root_uri {
        return uri.to_string();
    }
    if let Some(path) = root_path {
        if let Ok(uri) = fs_path_to_uri(path) {
            return uri;
        }
        return path.to_string();
    }
    std::env::current_dir()
        .ok()
        .and_then(|p| fs_path_to_uri(p).ok())
        .unwrap_or_else(|| "file:///".to_string())
}
