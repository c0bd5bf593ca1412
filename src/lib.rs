//! # dirsort
//!
//! List the immediate entries of a directory sorted by their total size.
//!
//! Files report their own length. Directories report the sum of every
//! regular file below them, computed by a single parallel walk of the tree
//! that records an aggregate size for every directory it visits.
//!
//! ## Main Parts
//!
//! - [`sizer`] - Concurrent per-directory size aggregation
//! - [`lister`] - One-level listing of the root's children
//! - [`sorting`] - Ordering entries by size
//! - [`utils::format_size`] - Decimal byte formatting
//! - [`report`] - Combines the above into one sorted listing

pub mod config;
pub mod entry;
pub mod lister;
pub mod output;
pub mod report;
pub mod sizer;
pub mod sorting;
pub mod utils;
pub mod warning;

pub use config::{FileConfig, ScanOptions, SortOrder};
pub use entry::{Entries, Entry, EntryType};
pub use report::Report;
pub use sizer::{DirectorySizeMap, DirectorySizer, DirectorySizes};
pub use warning::ScanWarning;
