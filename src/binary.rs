//! Binary data utilities
//!
//! Functions for binary data detection and size formatting.

use content_inspector::{inspect, ContentType};

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB"];

/// Check if data contains binary content
///
/// Uses statistical analysis via the content_inspector crate to detect
/// binary data. This is more robust than simple null-byte detection,
/// correctly handling text encodings like UTF-16 that may contain null bytes.
pub fn is_binary(data: &[u8]) -> bool {
    matches!(inspect(data), ContentType::BINARY)
}

/// Format byte count as human-readable size
///
/// Divides by 1024 until the value drops below 1024, from B up to TB, and
/// prints two decimal places.
///
/// # Examples
/// ```
/// use curlscope::binary::format_size;
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(0), "0.00 B");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} TB", size)
}
