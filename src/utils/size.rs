//! Size formatting utilities.
//!
//! This module turns raw byte counts into the decimal (base 1000) strings
//! shown next to every listed entry.

/// Bytes in one decimal kilobyte.
pub const KB: u64 = 1_000;

/// Bytes in one decimal megabyte.
pub const MB: u64 = 1_000_000;

/// Bytes in one decimal gigabyte.
pub const GB: u64 = 1_000_000_000;

/// Format a byte count as a human-readable decimal size.
///
/// Thresholds are base 1000 and are applied to the raw byte count:
///
/// - below 1 000: `"<n> bytes"`
/// - below 1 000 000: `"<n / 1000> KB"`
/// - below 1 000 000 000: `"<n / 1e6> MB"`
/// - otherwise: `"<n / 1e9> GB"`
///
/// Fractional values are rounded half-up to exactly two decimal places using
/// integer arithmetic, so results never suffer from binary floating point
/// representation error.
///
/// # Examples
///
/// ```
/// # use dirsort::utils::format_size;
/// assert_eq!(format_size(999), "999 bytes");
/// assert_eq!(format_size(1_500_000), "1.50 MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let (unit, suffix) = match bytes {
        b if b >= GB => (GB, "GB"),
        b if b >= MB => (MB, "MB"),
        b if b >= KB => (KB, "KB"),
        b => return format!("{b} bytes"),
    };

    let hundredths = scaled_hundredths(bytes, unit);
    format!("{}.{:02} {suffix}", hundredths / 100, hundredths % 100)
}

/// Compute `bytes / unit` in hundredths, rounded half-up.
fn scaled_hundredths(bytes: u64, unit: u64) -> u128 {
    let unit = u128::from(unit);
    (u128::from(bytes) * 100 + unit / 2) / unit
}
