//! Scanning configuration for directory size aggregation.
//!
//! This module defines the options that control how the directory tree is
//! traversed while sizes are computed.

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to trace every directory entered during the walk
    pub verbose: bool,

    /// Number of worker threads for the walk (0 = rayon's global pool)
    pub threads: usize,
}
