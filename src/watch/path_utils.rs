// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Path, PathBuf};

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again. This only works while the
///   path still exists.
///
/// Returns `None` if the path cannot be related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_slash(rel));
    }

    // macOS reports /private/var/... for paths watched as /var/...
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(to_slash(rel));
        }
    }

    None
}

/// Relative path against the first of `roots` that contains `path`.
///
/// Roots are tried longest first so nested watch roots resolve to the
/// innermost one.
pub fn relative_to_any(roots: &[PathBuf], path: &Path) -> Option<String> {
    let mut sorted: Vec<&PathBuf> = roots.iter().collect();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.as_os_str().len()));

    sorted
        .into_iter()
        .find_map(|root| relative_str(root, path))
}

fn to_slash(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_root() {
        let rel = relative_str(Path::new("/srv/site"), Path::new("/srv/site/css/a.css"));
        assert_eq!(rel.as_deref(), Some("css/a.css"));
    }

    #[test]
    fn unrelated_path_is_none() {
        assert_eq!(
            relative_str(Path::new("/srv/site"), Path::new("/etc/passwd")),
            None
        );
    }

    #[test]
    fn innermost_root_wins() {
        let roots = vec![PathBuf::from("/srv"), PathBuf::from("/srv/site")];
        let rel = relative_to_any(&roots, Path::new("/srv/site/index.html"));
        assert_eq!(rel.as_deref(), Some("index.html"));
    }
}
