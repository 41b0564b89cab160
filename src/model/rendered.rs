//! The installed table + markup pair for a document

use std::path::PathBuf;
use std::time::SystemTime;

use crate::csv::Table;

/// Where the rendered content came from; the invalidation key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceIdentity {
    /// File path, `None` for content that never came from disk
    pub path: Option<PathBuf>,
    /// Modification time as of the last load or save
    pub modified: Option<SystemTime>,
}

/// Cached parse + render result.
///
/// Replaced as a whole on every successful cycle, so `table` and `markup`
/// always describe the same content.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub source: SourceIdentity,
    pub table: Table,
    pub markup: String,
    pub rendered_at: SystemTime,
}

impl RenderedDocument {
    pub fn new(source: SourceIdentity, table: Table, markup: String) -> Self {
        Self {
            source,
            table,
            markup,
            rendered_at: SystemTime::now(),
        }
    }
}
