//! Live edit state for an open document

/// Per-document edit state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    /// The live, possibly unsaved text
    pub raw_content: String,
    /// Text as last loaded from or written to disk
    pub saved_content: String,
    /// Whether the live text differs from the saved text
    pub has_unsaved_changes: bool,
    /// Revision of the debounce timer currently running, if any
    pub pending_debounce: Option<u64>,
}

impl EditSession {
    /// Session for freshly loaded content
    pub fn new(content: String) -> Self {
        Self {
            saved_content: content.clone(),
            raw_content: content,
            has_unsaved_changes: false,
            pending_debounce: None,
        }
    }

    /// Record new text and (re)start the debounce timer for `revision`
    pub fn apply_edit(&mut self, text: String, revision: u64) {
        self.has_unsaved_changes = text != self.saved_content;
        self.raw_content = text;
        self.pending_debounce = Some(revision);
    }

    /// `content` is now what is on disk
    pub fn mark_saved(&mut self, content: String) {
        self.has_unsaved_changes = self.raw_content != content;
        self.saved_content = content;
    }
}
