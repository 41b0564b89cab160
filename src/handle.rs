//! Stateful handle for one open document
//!
//! Operations return immediately; the work they start runs on worker
//! threads. Call [`DocumentHandle::process_pending`] from the owning loop, or
//! [`DocumentHandle::wait_idle`] to block until everything has settled.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::csv::{Delimiter, Table};
use crate::error::DocumentError;
use crate::messages::DocumentMsg;
use crate::model::{CycleStats, DocumentModel, DocumentState, RenderedDocument};
use crate::runtime::{FileAccess, Runtime, StdFileAccess};
use crate::update::update;

pub struct DocumentHandle {
    model: DocumentModel,
    runtime: Runtime,
    files: Arc<dyn FileAccess>,
}

impl DocumentHandle {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_file_access(config, Arc::new(StdFileAccess))
    }

    /// Handle whose workers go through `files` instead of the filesystem
    pub fn with_file_access(config: EngineConfig, files: Arc<dyn FileAccess>) -> Self {
        let bounded_preview =
            config.limits.row_limit.is_some() || config.limits.column_limit.is_some();
        let model = DocumentModel::new(config.debounce_ms, bounded_preview);
        let runtime = Runtime::new(Arc::new(config), Arc::clone(&files));
        Self {
            model,
            runtime,
            files,
        }
    }

    /// Feed one message through `update` and run the resulting command
    pub fn dispatch(&mut self, msg: DocumentMsg) {
        let cmd = update(&mut self.model, msg);
        self.runtime.set_latest_revision(self.model.revision);
        if let Some(cmd) = cmd {
            self.runtime.execute(cmd);
        }
    }

    // === Operations ===

    pub fn load(&mut self, path: impl Into<PathBuf>) {
        self.dispatch(DocumentMsg::Load(path.into()));
    }

    pub fn update_content(&mut self, text: impl Into<String>) {
        self.dispatch(DocumentMsg::ContentChanged(text.into()));
    }

    pub fn change_delimiter(&mut self, delimiter: Delimiter) {
        self.dispatch(DocumentMsg::ChangeDelimiter(delimiter));
    }

    /// Replace one cell; `row == None` edits the header
    pub fn edit_cell(&mut self, row: Option<usize>, col: usize, value: impl Into<String>) {
        self.dispatch(DocumentMsg::EditCell {
            row,
            col,
            value: value.into(),
        });
    }

    pub fn save(&mut self) {
        self.dispatch(DocumentMsg::Save);
    }

    pub fn reload(&mut self) {
        self.dispatch(DocumentMsg::Reload);
    }

    /// Apply every worker result that has arrived. Returns true if any did.
    pub fn process_pending(&mut self) -> bool {
        let mut processed = false;
        while let Some(msg) = self.runtime.try_next() {
            self.dispatch(msg);
            processed = true;
        }
        processed
    }

    /// Block until no worker is running, or `timeout` passes.
    ///
    /// Returns false on timeout.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.runtime.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(
                    "Timed out waiting for {} task(s)",
                    self.runtime.in_flight()
                );
                return false;
            }
            if let Some(msg) = self.runtime.next_timeout(remaining) {
                self.dispatch(msg);
            }
        }
        true
    }

    /// Whether the file changed on disk since it was last loaded or saved
    pub fn check_external_change(&self) -> bool {
        let (Some(path), Some(rendered)) = (&self.model.path, &self.model.rendered) else {
            return false;
        };
        let current = self.files.modification_time(path);
        let changed = current != rendered.source.modified;
        if changed {
            tracing::info!("{} changed on disk", path.display());
        }
        changed
    }

    // === Observation ===

    pub fn state(&self) -> DocumentState {
        self.model.state
    }

    /// Snapshot of the installed document; stays valid across later updates
    pub fn current(&self) -> Option<Arc<RenderedDocument>> {
        self.model.rendered.clone()
    }

    pub fn current_table(&self) -> Option<&Table> {
        self.model.current_table()
    }

    pub fn current_markup(&self) -> Option<&str> {
        self.model.current_markup()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.model.has_unsaved_changes()
    }

    pub fn last_error(&self) -> Option<&DocumentError> {
        self.model.last_error.as_ref()
    }

    pub fn raw_content(&self) -> Option<&str> {
        self.model.session.as_ref().map(|s| s.raw_content.as_str())
    }

    pub fn delimiter(&self) -> Option<Delimiter> {
        self.model.delimiter
    }

    pub fn path(&self) -> Option<&Path> {
        self.model.path.as_deref()
    }

    pub fn stats(&self) -> CycleStats {
        self.model.stats
    }
}
