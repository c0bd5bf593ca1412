//! Sorting configuration for the entry listing.
//!
//! This module defines the direction in which listed entries are ordered by
//! their total size.

use std::fmt::{Display, Formatter, Result};

use clap::ValueEnum;
use serde::Serialize;

/// Direction in which entries are ordered by size.
///
/// The order is parsed by the tool itself rather than by clap so that an
/// invalid value can be answered with the usage text on stdout and exit
/// code 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest entries first
    #[default]
    Asc,

    /// Largest entries first
    Desc,
}

impl SortOrder {
    /// Parse a sort order from user input (`"asc"` or `"desc"`, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error naming the rejected value when it is neither `asc` nor `desc`.
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        Self::from_str(value.trim(), true).map_err(|_| {
            anyhow::anyhow!("invalid sort order \"{value}\", expected asc or desc")
        })
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}
