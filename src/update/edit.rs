//! Edit handling: debounced re-parse, delimiter override and cell edits
//!
//! Flow: `ContentChanged` -> `DebouncedParse` -> `ParseReady` -> `RunParse`
//! -> `ParseCompleted`. Each step carries the revision it was issued for.

use crate::commands::Cmd;
use crate::csv::{detect_delimiter, Delimiter};
use crate::error::DocumentError;
use crate::model::{DocumentModel, DocumentState, EditSession, RenderedDocument};
use crate::pipeline::Rendered;

/// Record new text and restart the debounce timer
pub fn update_content(model: &mut DocumentModel, text: String) -> Option<Cmd> {
    let revision = model.bump_revision();

    if model.loading_revision.take().is_some() {
        tracing::debug!("Edit supersedes the load in flight");
        // The edit belongs to the file being opened, with any delimiter picked for it
        if let Some(path) = model.loading_path.take() {
            model.adopt_path(path);
        }
        if let Some(wanted) = model.pending_delimiter.take() {
            model.delimiter = Some(wanted);
        }
    }

    let session = model
        .session
        .get_or_insert_with(|| EditSession::new(String::new()));
    session.apply_edit(text, revision);

    model.state = DocumentState::Debouncing;
    tracing::trace!(
        "Content changed (revision {}), parse in {}ms",
        revision,
        model.debounce_ms
    );

    Some(Cmd::DebouncedParse {
        revision,
        delay_ms: model.debounce_ms,
    })
}

/// Debounce timer fired
pub fn parse_ready(model: &mut DocumentModel, revision: u64) -> Option<Cmd> {
    if revision != model.revision {
        tracing::trace!(
            "Skipping stale parse: revision {} (current {})",
            revision,
            model.revision
        );
        return None;
    }

    let session = model.session.as_mut()?;
    session.pending_debounce = None;
    let source = session.raw_content.clone();

    let delimiter = match (model.delimiter, model.kind) {
        (Some(d), _) => d,
        (None, Some(kind)) => kind.initial_delimiter(&source),
        (None, None) => detect_delimiter(&source),
    };
    model.delimiter = Some(delimiter);

    Some(start_parse(model, revision, source, delimiter))
}

/// Worker finished a parse + render
pub fn parse_completed(
    model: &mut DocumentModel,
    revision: u64,
    result: Result<Option<Rendered>, DocumentError>,
) -> Option<Cmd> {
    if revision != model.revision {
        tracing::debug!(
            "Discarding stale parse result: revision {} (current {})",
            revision,
            model.revision
        );
        model.stats.stale_discarded += 1;
        return None;
    }

    match result {
        Ok(Some(rendered)) => {
            tracing::debug!(
                "Installed revision {}: {}",
                revision,
                rendered.table.summary()
            );
            let source = model.source_identity();
            model.install(RenderedDocument::new(
                source,
                rendered.table,
                rendered.markup,
            ));
            model.last_error = None;
            model.state = DocumentState::Idle;
        }
        Ok(None) => {
            // Cancelled although current; nothing newer is coming
            model.state = DocumentState::Idle;
        }
        Err(e) => {
            tracing::warn!("Parse failed: {}", e);
            model.last_error = Some(e);
            model.state = DocumentState::Error;
        }
    }
    None
}

/// User override: re-parse immediately with `delimiter`
pub fn update_delimiter(model: &mut DocumentModel, delimiter: Delimiter) -> Option<Cmd> {
    if model.state == DocumentState::Loading {
        tracing::debug!("Delimiter {} queued until load completes", delimiter);
        model.pending_delimiter = Some(delimiter);
        return None;
    }

    model.delimiter = Some(delimiter);
    let source = match model.session.as_mut() {
        Some(session) => {
            session.pending_debounce = None;
            session.raw_content.clone()
        }
        None => return None,
    };

    let revision = model.bump_revision();
    tracing::info!("Delimiter changed to {}", delimiter);
    Some(start_parse(model, revision, source, delimiter))
}

/// Replace one cell and feed the re-serialized table through the edit path
pub fn edit_cell(
    model: &mut DocumentModel,
    row: Option<usize>,
    col: usize,
    value: &str,
) -> Option<Cmd> {
    if model.state.is_busy() {
        tracing::warn!("Cell edit refused: document is {:?}", model.state);
        return None;
    }
    if model.bounded_preview {
        tracing::warn!("Cell edit refused: table is a bounded preview");
        return None;
    }

    let Some(table) = model.current_table() else {
        tracing::warn!("Cell edit refused: nothing rendered");
        return None;
    };
    let Some(edited) = table.with_cell(row, col, value) else {
        tracing::warn!("Cell edit out of range: row {:?}, column {}", row, col);
        return None;
    };

    update_content(model, edited.to_delimited())
}

fn start_parse(
    model: &mut DocumentModel,
    revision: u64,
    source: String,
    delimiter: Delimiter,
) -> Cmd {
    model.state = DocumentState::Parsing;
    model.stats.parses_started += 1;
    Cmd::RunParse {
        revision,
        source,
        delimiter,
        path: model.path.clone(),
    }
}
