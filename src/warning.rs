//! Non-fatal problems met while listing or sizing.
//!
//! A warning is recorded whenever one entry or one subtree cannot be read.
//! The run carries on; only a failure at the root is escalated to an error.

use std::{
    fmt::{Display, Formatter, Result},
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;

/// A contained failure affecting a single path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    /// The path that could not be read
    pub path: PathBuf,

    /// Human-readable description of what went wrong
    pub message: String,
}

impl ScanWarning {
    /// Create a warning for `path` with an arbitrary message.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a warning from an I/O error raised while accessing `path`.
    #[must_use]
    pub fn io(path: &Path, err: &io::Error) -> Self {
        Self::new(path, err.to_string())
    }
}

impl Display for ScanWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "Cannot access {}: {}", self.path.display(), self.message)
    }
}
