//! Shared helpers for naming and sizing scanned entries

use std::path::Path;

/// Suffix after the last `.` of a file name.
///
/// Names without a `.`, names starting with `.` (`.bashrc`) and names ending
/// with `.` have no extension. Case is kept as found.
pub fn guess_extension(name: &str) -> Option<&str> {
    if name.starts_with('.') {
        return None;
    }
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Hidden entries are those whose name starts with `.`.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Name for the root node: the base name of `path`, or the raw path string
/// when there is none (`/`, `..`).
pub fn root_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1}T", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
