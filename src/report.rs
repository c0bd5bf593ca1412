//! Assembly of the final listing.
//!
//! A report sizes the whole tree, lists the root's immediate children, gives
//! every directory its aggregate size from the size map, and sorts the result.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Result;

use crate::{
    config::SortOrder,
    entry::Entries,
    lister::list_entries,
    sizer::DirectorySizer,
    warning::ScanWarning,
};

/// Everything needed to print one run's result.
#[derive(Debug)]
pub struct Report {
    /// The directory whose children were listed
    pub root: PathBuf,

    /// The order `entries` are sorted in
    pub order: SortOrder,

    /// The sized children of `root`, sorted
    pub entries: Entries,

    /// Problems met while listing or sizing; none of them aborted the run
    pub warnings: Vec<ScanWarning>,

    /// Number of directories whose size was computed, root included
    pub directories_sized: usize,

    /// Wall-clock time spent building the report
    pub elapsed: Duration,
}

impl Report {
    /// Build the report for `root`.
    ///
    /// The size walk runs first so that an unreadable root fails before
    /// anything is listed. A directory missing from the size map (for example
    /// a symlink to a directory outside the tree) is reported with size 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be opened or enumerated.
    pub fn build(root: &Path, order: SortOrder, sizer: &DirectorySizer) -> Result<Self> {
        let start = Instant::now();

        let sizes = sizer.sizes(root)?;
        let listing = list_entries(root)?;

        let mut entries = listing.entries;
        for entry in entries.iter_mut().filter(|e| e.is_dir()) {
            entry.size = sizes.map.get(&entry.path).unwrap_or(0);
        }

        let mut entries = Entries::from(entries);
        entries.sort(order);

        let mut warnings = sizes.warnings;
        warnings.extend(listing.warnings);
        warnings.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self {
            root: root.to_path_buf(),
            order,
            entries,
            warnings,
            directories_sized: sizes.map.len(),
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanOptions;
    use std::fs;
    use tempfile::TempDir;

    fn sizer() -> DirectorySizer {
        DirectorySizer::new(ScanOptions::default()).with_quiet(true)
    }

    #[test]
    fn test_build_fills_directory_sizes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(tmp.path().join("sub").join("deeper")).unwrap();
        fs::write(tmp.path().join("sub").join("x"), vec![0u8; 30]).unwrap();
        fs::write(tmp.path().join("sub").join("deeper").join("y"), vec![0u8; 70]).unwrap();

        let report = Report::build(tmp.path(), SortOrder::Desc, &sizer()).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries.get("sub").map(|e| e.size), Some(100));
        assert_eq!(report.entries.get("a").map(|e| e.size), Some(100));
        assert_eq!(report.directories_sized, 3);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_build_empty_root() {
        let tmp = TempDir::new().unwrap();
        let report = Report::build(tmp.path(), SortOrder::Asc, &sizer()).unwrap();

        assert!(report.entries.is_empty());
        assert_eq!(report.directories_sized, 1);
    }

    #[test]
    fn test_build_fails_for_missing_root() {
        let tmp = TempDir::new().unwrap();
        assert!(Report::build(&tmp.path().join("absent"), SortOrder::Asc, &sizer()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_build_sizes_non_utf8_directory() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let odd = tmp.path().join(OsStr::from_bytes(b"d\xff"));
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("f"), vec![0u8; 42]).unwrap();

        let report = Report::build(tmp.path(), SortOrder::Asc, &sizer()).unwrap();

        assert_eq!(report.entries.len(), 1);
        let entry = &report.entries.as_slice()[0];
        assert_eq!(entry.path, odd);
        assert_eq!(entry.size, 42);
    }
}
