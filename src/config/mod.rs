//! Configuration types for scanning, sorting and the persistent config file.
//!
//! Values are resolved once in the binary (CLI > config file > default) and
//! then handed to the sizer and the report as plain values.

pub mod file;
pub mod scan;
pub mod sort;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use file::FileConfig;
pub use scan::ScanOptions;
pub use sort::SortOrder;

/// Resolve the root directory to an absolute path.
///
/// An absent or empty root means the current working directory. A leading
/// `~` is expanded to the home directory, and relative paths are anchored at
/// the current working directory without resolving symlinks, so paths that
/// are later listed under the root share its exact prefix.
///
/// # Errors
///
/// Returns an error if the current working directory cannot be determined.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(path) if !path.as_os_str().is_empty() => {
            let expanded = file::expand_tilde(path);
            std::path::absolute(&expanded)
                .with_context(|| format!("Failed to resolve root {}", expanded.display()))
        }
        _ => std::env::current_dir().context("Failed to determine the current directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_defaults_to_current_dir() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(resolve_root(None).unwrap(), cwd);
        assert_eq!(resolve_root(Some(Path::new(""))).unwrap(), cwd);
    }

    #[test]
    fn test_resolve_root_keeps_absolute_paths() {
        let root = std::env::temp_dir();
        assert_eq!(resolve_root(Some(root.as_path())).unwrap(), root);
    }

    #[test]
    fn test_resolve_root_anchors_relative_paths() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = resolve_root(Some(Path::new("some/dir"))).unwrap();

        assert!(resolved.is_absolute());
        assert_eq!(resolved, cwd.join("some").join("dir"));
    }
}
