//! Entry sorting functionality.
//!
//! This module orders listed entries by their size.

use std::cmp::Ordering;

use crate::config::SortOrder;
use crate::entry::Entry;

/// Sort entries in place by size.
///
/// - `Asc`: smallest first (non-decreasing sizes)
/// - `Desc`: largest first (non-increasing sizes)
///
/// Entries of equal size are ordered by name, so repeated runs over an
/// unchanged tree print the same listing. The result is always a
/// permutation of the input.
///
/// # Examples
///
/// ```no_run
/// # use dirsort::{sorting::sort_entries, config::SortOrder, entry::Entry};
/// # fn example(mut entries: Vec<Entry>) {
/// sort_entries(&mut entries, SortOrder::Desc);
/// # }
/// ```
pub fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    entries.sort_by(|a, b| compare(a, b, order));
}

/// Compare two entries for the requested order.
fn compare(a: &Entry, b: &Entry, order: SortOrder) -> Ordering {
    let by_size = match order {
        SortOrder::Asc => a.size.cmp(&b.size),
        SortOrder::Desc => b.size.cmp(&a.size),
    };

    by_size.then_with(|| a.name.cmp(&b.name))
}
