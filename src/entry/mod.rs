//! Listed entries and their collection.
//!
//! ## Main Parts
//!
//! - [`Entry`] - One immediate child of the root, with its name, type and size
//! - [`EntryType`] - File or directory
//! - [`Entries`] - The sized children of the root, ready to be sorted and printed

#[allow(clippy::module_inception)]
// This is acceptable as it is the main module for entry records
pub mod entry;
pub mod entries;

pub use entries::Entries;
pub use entry::{Entry, EntryType};
