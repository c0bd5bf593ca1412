//! One-level listing of the root directory.
//!
//! The immediate children of the root are read with a single `read_dir` and
//! each one is `stat`ed to decide whether it is a file or a directory.
//! Nothing below the first level is read here; directory sizes come from the
//! [`crate::sizer`] walk.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{
    entry::{Entry, EntryType},
    warning::ScanWarning,
};

/// Immediate children of the root plus the ones that could not be inspected.
#[derive(Debug, Default)]
pub struct Listing {
    /// Entries in name order; directories carry a size of 0
    pub entries: Vec<Entry>,

    /// Children skipped because they could not be read or stat'ed
    pub warnings: Vec<ScanWarning>,
}

/// List the immediate children of `root`.
///
/// Hidden entries (names starting with `.`) are included, and so are names
/// that are not valid UTF-8: the displayed name is converted lossily while
/// the entry path keeps the exact bytes. Symlinks are followed when
/// classifying, so a link to a directory is listed as a directory. Files
/// carry their length; directories are left at 0 for the caller to fill in.
///
/// # Errors
///
/// Returns an error if `root` cannot be opened as a directory.
pub fn list_entries(root: &Path) -> Result<Listing> {
    let children = fs::read_dir(root)
        .with_context(|| format!("Failed to list root directory {}", root.display()))?;

    let mut listing = Listing::default();
    let mut found = Vec::new();
    for child in children {
        match child {
            Ok(child) => found.push((child.file_name(), child.path())),
            Err(err) => listing.warnings.push(ScanWarning::io(root, &err)),
        }
    }
    found.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    for (name, path) in found {
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                listing.warnings.push(ScanWarning::io(&path, &err));
                continue;
            }
        };

        let name = name.to_string_lossy().into_owned();
        let entry = if metadata.is_dir() {
            Entry::new(name, EntryType::Directory, path, 0)
        } else {
            Entry::new(name, EntryType::File, path, metadata.len())
        };
        listing.entries.push(entry);
    }

    Ok(listing)
}
