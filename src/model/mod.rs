//! Coordinator state for one open document
//!
//! `DocumentModel` is owned by a single `DocumentHandle` and only changed by
//! `update`; worker threads never touch it.

mod rendered;
mod session;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use crate::csv::{Delimiter, Table};
use crate::error::DocumentError;
use crate::pipeline::DocumentKind;

pub use rendered::{RenderedDocument, SourceIdentity};
pub use session::EditSession;

/// Coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentState {
    #[default]
    Idle,
    /// A load worker is running
    Loading,
    /// An edit is waiting out the debounce delay
    Debouncing,
    /// A parse worker is running
    Parsing,
    /// The last operation failed; behaves like `Idle`
    Error,
}

impl DocumentState {
    /// Whether work is pending that will replace the current document
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            DocumentState::Loading | DocumentState::Debouncing | DocumentState::Parsing
        )
    }
}

/// Counters for observing coordinator behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub loads_completed: u64,
    pub parses_started: u64,
    pub renders_installed: u64,
    pub stale_discarded: u64,
}

/// All state for one open document
#[derive(Debug, Clone, Default)]
pub struct DocumentModel {
    /// File backing the document, set by a load that completes or is edited over
    pub path: Option<PathBuf>,
    pub kind: Option<DocumentKind>,
    /// Delimiter in use; detection only runs while this is `None`
    pub delimiter: Option<Delimiter>,
    /// Delimiter chosen while a load was in flight
    pub pending_delimiter: Option<Delimiter>,
    pub session: Option<EditSession>,
    pub rendered: Option<Arc<RenderedDocument>>,
    pub state: DocumentState,
    /// Incremented by every operation that supersedes earlier work
    pub revision: u64,
    /// Revision of the load in flight (single-flight guard)
    pub loading_revision: Option<u64>,
    /// File the load in flight is reading
    pub loading_path: Option<PathBuf>,
    pub last_error: Option<DocumentError>,
    pub debounce_ms: u64,
    /// Row/column limits are active, so the table is not the whole file
    pub bounded_preview: bool,
    pub stats: CycleStats,
}

impl DocumentModel {
    pub fn new(debounce_ms: u64, bounded_preview: bool) -> Self {
        Self {
            debounce_ms,
            bounded_preview,
            ..Self::default()
        }
    }

    /// Start a new revision, making all earlier work stale
    pub fn bump_revision(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }

    pub fn current_table(&self) -> Option<&Table> {
        self.rendered.as_ref().map(|r| &r.table)
    }

    pub fn current_markup(&self) -> Option<&str> {
        self.rendered.as_ref().map(|r| r.markup.as_str())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.has_unsaved_changes)
    }

    /// Point the document at `path`. A different file forgets the delimiter.
    pub fn adopt_path(&mut self, path: PathBuf) {
        if self.path.as_ref() != Some(&path) {
            self.delimiter = None;
        }
        self.kind = Some(DocumentKind::from_path(&path));
        self.path = Some(path);
    }

    /// Source identity for newly rendered content
    pub fn source_identity(&self) -> SourceIdentity {
        match &self.rendered {
            Some(rendered) if rendered.source.path == self.path => rendered.source.clone(),
            _ => SourceIdentity {
                path: self.path.clone(),
                modified: None,
            },
        }
    }

    /// Re-stamp the installed document with a new modification time
    pub fn restamp_source(&mut self, modified: Option<SystemTime>) {
        let Some(current) = self.rendered.as_ref() else {
            return;
        };
        let source = SourceIdentity {
            path: current.source.path.clone(),
            modified,
        };
        self.rendered = Some(Arc::new(RenderedDocument::new(
            source,
            current.table.clone(),
            current.markup.clone(),
        )));
    }

    /// Install a new rendered document, replacing the old one wholesale
    pub fn install(&mut self, rendered: RenderedDocument) {
        self.rendered = Some(Arc::new(rendered));
        self.stats.renders_installed += 1;
    }
}
