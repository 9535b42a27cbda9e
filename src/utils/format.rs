//! Formatting utilities for file sizes.

/// Format a byte count with decimal units and two decimals (e.g. "1.50 MB").
///
/// Anything below a megabyte is shown in kilobytes, so small files read
/// as "0.50 KB" rather than bytes.
pub fn format_file_size(bytes: u64) -> String {
    let bytes_f = bytes as f64;
    if bytes >= 1_000_000_000 {
        format!("{:.2} GB", bytes_f / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.2} MB", bytes_f / 1_000_000.0)
    } else {
        format!("{:.2} KB", bytes_f / 1_000.0)
    }
}

/// Same as [`format_file_size`], with a dash for unknown sizes.
pub fn format_optional_size(bytes: Option<u64>) -> String {
    bytes.map(format_file_size).unwrap_or_else(|| "-".to_string())
}
