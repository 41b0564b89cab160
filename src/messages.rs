//! Message types for the document coordinator
//!
//! User operations and worker results both arrive as a `DocumentMsg`; the
//! coordinator's `update` consumes them one at a time.

use std::path::PathBuf;
use std::time::SystemTime;

use crate::csv::Delimiter;
use crate::error::DocumentError;
use crate::pipeline::Rendered;

/// A file read, parsed and rendered by a load worker
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub content: String,
    pub delimiter: Delimiter,
    pub modified: Option<SystemTime>,
    pub rendered: Rendered,
}

/// Document messages
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    // === User operations ===
    /// Open a file (no-op while a load is already in flight)
    Load(PathBuf),
    /// Discard edits and load the current file again
    Reload,
    /// The live text changed
    ContentChanged(String),
    /// User picked a delimiter; re-parse immediately
    ChangeDelimiter(Delimiter),
    /// Replace one cell (`row == None` is the header) and re-serialize
    EditCell {
        row: Option<usize>,
        col: usize,
        value: String,
    },
    /// Write the live text to disk
    Save,

    // === Worker results ===
    /// Load finished; `Ok(None)` if it was cancelled
    FileLoaded {
        revision: u64,
        result: Result<Option<LoadedDocument>, DocumentError>,
    },
    /// Debounce delay for `revision` elapsed
    ParseReady { revision: u64 },
    /// Parse + render finished; `Ok(None)` if it was cancelled
    ParseCompleted {
        revision: u64,
        result: Result<Option<Rendered>, DocumentError>,
    },
    /// Save of `path` finished with the new modification time, if known
    SaveCompleted {
        path: PathBuf,
        content: String,
        result: Result<Option<SystemTime>, DocumentError>,
    },
}
