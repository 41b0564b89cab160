//! Command types for the document coordinator
//!
//! A `Cmd` is the one piece of background work an update asks for. Every
//! command runs on its own worker and sends exactly one `DocumentMsg` back.

use std::path::PathBuf;

use crate::csv::Delimiter;
use crate::pipeline::DocumentKind;

/// Commands returned by update functions
#[derive(Debug, Clone)]
pub enum Cmd {
    /// Read, parse and render a file in a background worker.
    /// Sends `DocumentMsg::FileLoaded` when done.
    LoadFile {
        path: PathBuf,
        revision: u64,
        kind: DocumentKind,
        /// Known delimiter; `None` runs detection
        delimiter: Option<Delimiter>,
    },
    /// Start debounce timer for a re-parse.
    /// After delay_ms, sends `DocumentMsg::ParseReady`.
    DebouncedParse { revision: u64, delay_ms: u64 },
    /// Parse and render in a background worker.
    /// Sends `DocumentMsg::ParseCompleted` when done.
    RunParse {
        revision: u64,
        source: String,
        delimiter: Delimiter,
        path: Option<PathBuf>,
    },
    /// Write content to disk in a background worker.
    /// Sends `DocumentMsg::SaveCompleted` when done.
    SaveFile { path: PathBuf, content: String },
}
