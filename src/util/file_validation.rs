//! File checks performed before reading a source file
//!
//! The size is probed from metadata so an oversized file is rejected
//! without reading it into memory.

use std::fs;
use std::io;
use std::path::Path;

/// Extensions opened with the delimited-table pipeline
const TABLE_EXTENSIONS: &[&str] = &["csv", "tsv", "tab", "txt"];

/// Size of a regular file in bytes.
///
/// Directories fail with `ErrorKind::IsADirectory`.
pub fn probe_file_size(path: &Path) -> io::Result<u64> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is a directory", path.display()),
        ));
    }

    Ok(metadata.len())
}

/// Check if a file path has an extension handled as a table
pub fn has_table_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get the filename from a path for display in error messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
