//! Error values surfaced by the document coordinator
//!
//! Errors carry the path, size, or I/O cause so callers can build a message;
//! malformed table content is never an error.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::csv::ParseError;
use crate::util::filename_for_display;

/// Why a source file could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceReason {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("is a directory")]
    IsDirectory,
    #[error("{0}")]
    Other(String),
}

impl From<&io::Error> for SourceReason {
    fn from(e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => SourceReason::NotFound,
            io::ErrorKind::PermissionDenied => SourceReason::PermissionDenied,
            io::ErrorKind::IsADirectory => SourceReason::IsDirectory,
            _ => SourceReason::Other(e.to_string()),
        }
    }
}

/// Why a save failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteReason {
    #[error("permission denied")]
    PermissionDenied,
    #[error("disk full")]
    DiskFull,
    #[error("{0}")]
    Other(String),
}

impl From<&io::Error> for WriteReason {
    fn from(e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::PermissionDenied => WriteReason::PermissionDenied,
            io::ErrorKind::StorageFull => WriteReason::DiskFull,
            _ => WriteReason::Other(e.to_string()),
        }
    }
}

/// Errors reported through `DocumentHandle::last_error`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Input exceeds the size ceiling; nothing was parsed
    #[error("{} is too large ({size} bytes, limit {limit} bytes)", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    /// The file could not be read
    #[error("cannot read {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: SourceReason },
    /// The file could not be written; edits are still unsaved
    #[error("cannot write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: WriteReason },
    /// Save requested for content that has no file behind it
    #[error("document has no file path")]
    NoPath,
}

impl DocumentError {
    pub fn read_failed(path: &Path, e: &io::Error) -> Self {
        DocumentError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: SourceReason::from(e),
        }
    }

    pub fn write_failed(path: &Path, e: &io::Error) -> Self {
        DocumentError::WriteFailed {
            path: path.to_path_buf(),
            reason: WriteReason::from(e),
        }
    }

    /// Attach a path to a parse error
    pub fn from_parse(path: Option<&Path>, e: ParseError) -> Self {
        match e {
            ParseError::FileTooLarge { size, limit } => DocumentError::FileTooLarge {
                path: path.map(Path::to_path_buf).unwrap_or_default(),
                size,
                limit,
            },
            ParseError::SourceUnavailable { path, reason } => {
                DocumentError::SourceUnavailable { path, reason }
            }
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::FileTooLarge { path, size, limit } => format!(
                "{} is too large ({:.1} MB, max {} MB)",
                filename_for_display(path),
                *size as f64 / (1024.0 * 1024.0),
                limit / (1024 * 1024)
            ),
            Self::SourceUnavailable { path, reason } => match reason {
                SourceReason::NotFound => format!("File not found: {}", filename_for_display(path)),
                SourceReason::PermissionDenied => {
                    format!("Permission denied: {}", filename_for_display(path))
                }
                SourceReason::IsDirectory => {
                    format!("Cannot open directory: {}", filename_for_display(path))
                }
                SourceReason::Other(msg) => {
                    format!("Error opening {}: {}", filename_for_display(path), msg)
                }
            },
            Self::WriteFailed { path, reason } => {
                format!("Could not save {}: {}", filename_for_display(path), reason)
            }
            Self::NoPath => "Document has no file to save to".to_string(),
        }
    }
}
