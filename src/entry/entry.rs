//! Core entry data structures and types.
//!
//! This module defines the record produced for every immediate child of the
//! root directory.

use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

use serde::Serialize;

use crate::utils::format_size;

/// Kind of a listed entry, as reported by `stat`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Anything that is not a directory
    File,

    /// A directory whose size is the sum of every regular file below it
    Directory,
}

impl Display for EntryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// One immediate child of the root directory.
///
/// Entries are created by the lister and, for directories, receive their
/// aggregate size from the directory size map before they are sorted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// File name of the entry, without its parent path
    pub name: String,

    /// Whether the entry is a file or a directory
    #[serde(rename = "type")]
    pub kind: EntryType,

    /// Full path of the entry (the root joined with `name`)
    pub path: PathBuf,

    /// Size in bytes: file length, or aggregate size for directories
    pub size: u64,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(name: String, kind: EntryType, path: PathBuf, size: u64) -> Self {
        Self {
            name,
            kind,
            path,
            size,
        }
    }

    /// Whether this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryType::Directory
    }
}

impl Display for Entry {
    /// Render the entry as a single listing line.
    ///
    /// ```text
    /// Name: sub, Type: directory, Size: 5.00 MB
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "Name: {}, Type: {}, Size: {}",
            self.name,
            self.kind,
            format_size(self.size)
        )
    }
}
