//! Concurrent directory size aggregation.
//!
//! This module walks a directory tree once and computes the aggregate byte
//! size of every directory it contains, root included. The tree is listed one
//! depth level at a time: every directory on the current level is read in
//! parallel on a rayon pool, its regular files are summed, and its
//! subdirectories form the next level. Once the deepest level is reached the
//! totals are rolled up level by level towards the root. Every file is
//! therefore visited exactly once, and the depth of the tree never grows the
//! call stack.
//!
//! Failures are partitioned: if the root cannot be read the whole call fails,
//! while a failure anywhere below the root is recorded as a [`ScanWarning`]
//! and only affects the totals of that directory and its ancestors.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use anyhow::{Context, Result};
use colored::Colorize;
use dashmap::DashMap;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{config::ScanOptions, warning::ScanWarning};

/// Mapping from directory path to the total size of the regular files below it.
///
/// Produced by [`DirectorySizer::sizes`] once every aggregation task has
/// joined; it is immutable from then on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectorySizeMap(HashMap<PathBuf, u64>);

impl DirectorySizeMap {
    /// Aggregate size of `dir`, if it was visited.
    #[must_use]
    pub fn get(&self, dir: &Path) -> Option<u64> {
        self.0.get(dir).copied()
    }

    /// Whether `dir` was visited.
    #[must_use]
    pub fn contains(&self, dir: &Path) -> bool {
        self.0.contains_key(dir)
    }

    /// Number of directories visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no directory was visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(directory, size)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, u64)> {
        self.0.iter().map(|(path, size)| (path.as_path(), *size))
    }
}

impl From<DashMap<PathBuf, u64>> for DirectorySizeMap {
    fn from(map: DashMap<PathBuf, u64>) -> Self {
        Self(map.into_iter().collect())
    }
}

/// Outcome of a size walk: the frozen size map plus every contained failure.
#[derive(Debug, Default)]
pub struct DirectorySizes {
    /// Aggregate size of every directory visited
    pub map: DirectorySizeMap,

    /// Problems met below the root, in no particular order
    pub warnings: Vec<ScanWarning>,
}

/// Computes aggregate sizes for every directory under a root.
#[derive(Debug)]
pub struct DirectorySizer {
    /// Configuration options for the walk
    scan_options: ScanOptions,

    /// When `true`, suppresses the spinner and directory tracing (used by `--json` mode).
    quiet: bool,
}

impl DirectorySizer {
    /// Create a new sizer with the specified options.
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress output).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Compute the aggregate size of `root` and of every directory below it.
    ///
    /// The walk runs on rayon's global pool, or on a dedicated pool of
    /// `threads` workers when [`ScanOptions::threads`] is non-zero. The call
    /// returns only after every directory has been sized.
    ///
    /// Symbolic links are not followed and contribute no bytes; only regular
    /// files are counted.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` itself cannot be opened or enumerated, or if
    /// a dedicated thread pool cannot be created. Failures below the root are
    /// reported in [`DirectorySizes::warnings`] instead.
    pub fn sizes(&self, root: &Path) -> Result<DirectorySizes> {
        let listing = DirListing::read(root)
            .with_context(|| format!("Failed to read root directory {}", root.display()))?;

        let walk = Walk {
            sizes: DashMap::new(),
            warnings: Mutex::new(Vec::new()),
            visited: AtomicUsize::new(0),
            progress: self.progress_bar(),
            trace: self.scan_options.verbose && !self.quiet,
        };

        self.install(|| walk.run(root, listing))?;

        let visited = walk.visited.load(Ordering::Relaxed);
        walk.progress
            .finish_with_message(format!("✅ Sized {visited} directories"));

        Ok(DirectorySizes {
            map: walk.sizes.into(),
            warnings: walk
                .warnings
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        })
    }

    /// Run `op` on the configured thread pool.
    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> Result<R> {
        if self.scan_options.threads == 0 {
            return Ok(op());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.scan_options.threads)
            .build()
            .context("Failed to build the scanning thread pool")?;

        Ok(pool.install(op))
    }

    fn progress_bar(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Sizing...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// State shared by every aggregation task of one walk.
struct Walk {
    sizes: DashMap<PathBuf, u64>,
    warnings: Mutex<Vec<ScanWarning>>,
    visited: AtomicUsize,
    progress: ProgressBar,
    trace: bool,
}

impl Walk {
    /// List the tree below `root` level by level, then roll the totals up.
    fn run(&self, root: &Path, listing: DirListing) {
        let mut levels = vec![vec![self.visit(root.to_path_buf(), None, Ok(listing))]];

        loop {
            let frontier: Vec<(PathBuf, usize)> = match levels.last_mut() {
                Some(level) => level
                    .iter_mut()
                    .enumerate()
                    .flat_map(|(parent, node)| {
                        std::mem::take(&mut node.subdirs)
                            .into_iter()
                            .map(move |dir| (dir, parent))
                    })
                    .collect(),
                None => break,
            };

            if frontier.is_empty() {
                break;
            }

            let next: Vec<Node> = frontier
                .into_par_iter()
                .map(|(dir, parent)| {
                    let listing = DirListing::read(&dir);
                    self.visit(dir, Some(parent), listing)
                })
                .collect();
            levels.push(next);
        }

        self.roll_up(&levels);
    }

    /// Turn one directory listing into a node, containing any failure to list it.
    fn visit(&self, dir: PathBuf, parent: Option<usize>, listing: io::Result<DirListing>) -> Node {
        if self.trace {
            self.progress.suspend(|| {
                eprintln!("{} {}", "Walking directory:".dimmed(), dir.display());
            });
        }

        match listing {
            Ok(listing) => {
                self.warn_all(listing.warnings);
                Node {
                    total: AtomicU64::new(listing.files_size),
                    subdirs: listing.subdirs,
                    path: dir,
                    parent,
                }
            }
            Err(err) => {
                self.warn_all(vec![ScanWarning::io(&dir, &err)]);
                Node {
                    path: dir,
                    parent,
                    total: AtomicU64::new(0),
                    subdirs: Vec::new(),
                }
            }
        }
    }

    /// Record every node, deepest level first, adding each total into its parent.
    ///
    /// A level is only recorded after the level below it has been fully
    /// added in, so every total is final when it is inserted.
    fn roll_up(&self, levels: &[Vec<Node>]) {
        for (depth, level) in levels.iter().enumerate().rev() {
            let parents = depth.checked_sub(1).and_then(|up| levels.get(up));

            level.par_iter().for_each(|node| {
                let total = node.total.load(Ordering::Relaxed);
                self.record(&node.path, total);

                if let Some(parent) = node.parent.and_then(|i| parents?.get(i)) {
                    // The closure never returns None, so the update cannot fail.
                    let _ = parent.total.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |sum| {
                        Some(sum.saturating_add(total))
                    });
                }
            });
        }
    }

    fn record(&self, dir: &Path, total: u64) {
        self.sizes.insert(dir.to_path_buf(), total);

        let n = self.visited.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress
            .set_message(format!("Sizing... {n} directories"));
    }

    fn warn_all(&self, warnings: Vec<ScanWarning>) {
        if warnings.is_empty() {
            return;
        }

        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(warnings);
    }
}

/// One directory of the walk, kept until its total has been rolled up.
struct Node {
    path: PathBuf,

    /// Index of the parent in the previous level (`None` for the root)
    parent: Option<usize>,

    /// Own files first, then the totals of every child as they are added in
    total: AtomicU64,

    /// Subdirectories still to be listed
    subdirs: Vec<PathBuf>,
}

/// The immediate contents of one directory, as needed for aggregation.
#[derive(Debug, Default)]
struct DirListing {
    /// Total length of the regular files directly inside the directory
    files_size: u64,

    /// Subdirectories to descend into (symlinks excluded)
    subdirs: Vec<PathBuf>,

    /// Children that could not be inspected
    warnings: Vec<ScanWarning>,
}

impl DirListing {
    /// List `dir`, failing only if the directory itself cannot be opened.
    fn read(dir: &Path) -> io::Result<Self> {
        let mut listing = Self::default();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    listing.warnings.push(ScanWarning::io(dir, &err));
                    continue;
                }
            };

            let path = entry.path();
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => listing.subdirs.push(path),
                Ok(kind) if kind.is_file() => match entry.metadata() {
                    Ok(metadata) => {
                        listing.files_size = listing.files_size.saturating_add(metadata.len());
                    }
                    Err(err) => listing.warnings.push(ScanWarning::io(&path, &err)),
                },
                Ok(_) => {}
                Err(err) => listing.warnings.push(ScanWarning::io(&path, &err)),
            }
        }

        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_bytes(path: &Path, len: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    fn quiet_sizer(threads: usize) -> DirectorySizer {
        DirectorySizer::new(ScanOptions {
            verbose: false,
            threads,
        })
        .with_quiet(true)
    }

    #[test]
    fn test_dir_listing_separates_files_and_dirs() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("a.bin"), 10);
        write_bytes(&tmp.path().join("b.bin"), 5);
        write_bytes(&tmp.path().join("nested").join("c.bin"), 100);

        let listing = DirListing::read(tmp.path()).unwrap();

        assert_eq!(listing.files_size, 15);
        assert_eq!(listing.subdirs, vec![tmp.path().join("nested")]);
        assert!(listing.warnings.is_empty());
    }

    #[test]
    fn test_dir_listing_missing_dir_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(DirListing::read(&tmp.path().join("absent")).is_err());
    }

    #[test]
    fn test_sizes_aggregates_nested_levels() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_bytes(&root.join("top.bin"), 1);
        write_bytes(&root.join("a").join("one.bin"), 10);
        write_bytes(&root.join("a").join("b").join("two.bin"), 100);
        write_bytes(&root.join("a").join("b").join("c").join("three.bin"), 1_000);
        fs::create_dir_all(root.join("empty")).unwrap();

        let result = quiet_sizer(0).sizes(root).unwrap();
        let map = &result.map;

        assert_eq!(map.len(), 5);
        assert_eq!(map.get(root), Some(1_111));
        assert_eq!(map.get(&root.join("a")), Some(1_110));
        assert_eq!(map.get(&root.join("a").join("b")), Some(1_100));
        assert_eq!(map.get(&root.join("a").join("b").join("c")), Some(1_000));
        assert_eq!(map.get(&root.join("empty")), Some(0));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_sizes_with_dedicated_pool_matches_global_pool() {
        let tmp = TempDir::new().unwrap();
        for i in 0..8 {
            for j in 0..4 {
                write_bytes(
                    &tmp.path().join(format!("d{i}")).join(format!("s{j}")).join("f"),
                    i * 10 + j,
                );
            }
        }

        let global = quiet_sizer(0).sizes(tmp.path()).unwrap();
        let pooled = quiet_sizer(2).sizes(tmp.path()).unwrap();

        assert_eq!(global.map, pooled.map);
        assert_eq!(global.map.len(), 1 + 8 + 32);
    }

    #[test]
    fn test_sizes_deep_chain_on_small_stack() {
        const DEPTH: usize = 1_500;

        let tmp = TempDir::new().unwrap();
        let mut deepest = tmp.path().to_path_buf();
        for _ in 0..DEPTH {
            deepest.push("a");
            fs::create_dir(&deepest).unwrap();
        }
        fs::write(deepest.join("f"), b"abc").unwrap();

        let root = tmp.path().to_path_buf();
        let result = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || quiet_sizer(0).sizes(&root))
            .unwrap()
            .join()
            .unwrap()
            .unwrap();

        assert_eq!(result.map.len(), DEPTH + 1);
        assert_eq!(result.map.get(tmp.path()), Some(3));
        assert_eq!(result.map.get(&deepest), Some(3));
        assert!(result.map.iter().all(|(_, size)| size == 3));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_sizes_fails_when_root_missing() {
        let tmp = TempDir::new().unwrap();
        let err = quiet_sizer(0)
            .sizes(&tmp.path().join("absent"))
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read root directory"));
    }

    #[test]
    fn test_sizes_fails_when_root_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        write_bytes(&file, 3);

        assert!(quiet_sizer(0).sizes(&file).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_sizes_does_not_follow_symlinks() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        write_bytes(&tmp.path().join("outside").join("big.bin"), 4_096);
        write_bytes(&root.join("small.bin"), 4);
        std::os::unix::fs::symlink(tmp.path().join("outside"), root.join("link")).unwrap();

        let result = quiet_sizer(0).sizes(&root).unwrap();

        assert_eq!(result.map.get(&root), Some(4));
        assert!(!result.map.contains(&root.join("link")));
    }

    #[test]
    fn test_directory_size_map_iter() {
        let map = DashMap::new();
        map.insert(PathBuf::from("/x"), 3);
        map.insert(PathBuf::from("/x/y"), 2);
        let map = DirectorySizeMap::from(map);

        let mut pairs: Vec<_> = map.iter().collect();
        pairs.sort_unstable();

        assert_eq!(
            pairs,
            vec![(Path::new("/x"), 3), (Path::new("/x/y"), 2)]
        );
        assert!(!map.is_empty());
    }
}
