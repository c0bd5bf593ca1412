//! Collection management for listed entries.
//!
//! This module provides the `Entries` struct which wraps the sized, sorted
//! children of the root directory and renders them for the console.

use crate::config::SortOrder;
use crate::sorting::sort_entries;

use super::Entry;

/// The listed children of the root directory.
#[derive(Debug, Default)]
pub struct Entries(Vec<Entry>);

impl From<Vec<Entry>> for Entries {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl Entries {
    /// Order the entries by size in the given direction.
    pub fn sort(&mut self, order: SortOrder) {
        sort_entries(&mut self.0, order);
    }

    /// Sum of the sizes of every entry, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.0.iter().map(|e| e.size).fold(0, u64::saturating_add)
    }

    /// Get the number of entries in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a slice of the underlying entries in their current order.
    #[must_use]
    pub fn as_slice(&self) -> &[Entry] {
        &self.0
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.0.iter().find(|e| e.name == name)
    }

    /// Render the listing, one line per entry, in the current order.
    ///
    /// # Output Format
    ///
    /// ```text
    /// Name: a, Type: file, Size: 100 bytes
    /// Name: b, Type: file, Size: 2.00 KB
    /// Name: sub, Type: directory, Size: 5.00 MB
    /// ```
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Print the listing to stdout.
    pub fn print_listing(&self) {
        for line in self.render() {
            println!("{line}");
        }
    }
}
