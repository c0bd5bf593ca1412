//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, a [`JsonOutput`] is serialized to stdout
//! as a single JSON object, replacing all human-readable output.

use serde::Serialize;

use crate::{
    config::SortOrder,
    entry::{Entry, EntryType},
    report::Report,
    utils::format_size,
    warning::ScanWarning,
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// The directory whose children were listed.
    pub root: String,

    /// The order entries are listed in.
    pub sort: SortOrder,

    /// The listed entries, in output order.
    pub entries: Vec<JsonEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,

    /// Non-fatal problems met during the run.
    pub warnings: Vec<ScanWarning>,
}

/// A single entry in the JSON output.
#[derive(Debug, Serialize)]
pub struct JsonEntry {
    /// Name of the entry.
    pub name: String,

    /// `"file"` or `"directory"`.
    #[serde(rename = "type")]
    pub kind: EntryType,

    /// Full path of the entry.
    pub path: String,

    /// Size in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.23 MB"`).
    pub size_formatted: String,
}

/// Aggregated summary across all listed entries.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Number of entries listed.
    pub total_entries: usize,

    /// Sum of all entry sizes in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,

    /// Number of directories sized during the walk, root included.
    pub directories_sized: usize,
}

impl JsonOutput {
    /// Build a `JsonOutput` from a finished report.
    #[must_use]
    pub fn from_report(report: &Report) -> Self {
        let total_size = report.entries.total_size();

        Self {
            root: report.root.display().to_string(),
            sort: report.order,
            entries: report
                .entries
                .as_slice()
                .iter()
                .map(JsonEntry::from_entry)
                .collect(),
            summary: JsonSummary {
                total_entries: report.entries.len(),
                total_size,
                total_size_formatted: format_size(total_size),
                directories_sized: report.directories_sized,
            },
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonEntry {
    /// Convert an `Entry` into a `JsonEntry`.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            kind: entry.kind,
            path: entry.path.display().to_string(),
            size: entry.size,
            size_formatted: format_size(entry.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entries;
    use std::{path::PathBuf, time::Duration};

    fn sample_report() -> Report {
        Report {
            root: PathBuf::from("/data"),
            order: SortOrder::Asc,
            entries: Entries::from(vec![
                Entry::new("a".into(), EntryType::File, PathBuf::from("/data/a"), 100),
                Entry::new(
                    "sub".into(),
                    EntryType::Directory,
                    PathBuf::from("/data/sub"),
                    5_000_000,
                ),
            ]),
            warnings: vec![ScanWarning::new("/data/sub/locked", "permission denied")],
            directories_sized: 2,
            elapsed: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_json_output_from_report() {
        let output = JsonOutput::from_report(&sample_report());

        assert_eq!(output.root, "/data");
        assert_eq!(output.entries.len(), 2);
        assert_eq!(output.summary.total_entries, 2);
        assert_eq!(output.summary.total_size, 5_000_100);
        assert_eq!(output.summary.total_size_formatted, "5.00 MB");
        assert_eq!(output.summary.directories_sized, 2);
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_json_serialization_shape() {
        let value = serde_json::to_value(JsonOutput::from_report(&sample_report())).unwrap();

        assert_eq!(value["sort"], "asc");
        assert_eq!(value["entries"][0]["name"], "a");
        assert_eq!(value["entries"][0]["type"], "file");
        assert_eq!(value["entries"][0]["size_formatted"], "100 bytes");
        assert_eq!(value["entries"][1]["type"], "directory");
        assert_eq!(value["warnings"][0]["path"], "/data/sub/locked");
        assert_eq!(value["warnings"][0]["message"], "permission denied");
    }
}
