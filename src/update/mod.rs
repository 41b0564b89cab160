//! Update functions for the document coordinator
//!
//! All state transformations flow through [`update`], which returns the side
//! effect to run (if any) as a [`Cmd`]. Worker results are matched against
//! `DocumentModel::revision`; anything older than the current revision is
//! discarded, so a stale result never replaces a fresher one.

mod edit;
mod load;
mod save;

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::DocumentModel;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut DocumentModel, msg: DocumentMsg) -> Option<Cmd> {
    let span = tracing::debug_span!("update", revision = model.revision);
    let _guard = span.enter();

    match msg {
        DocumentMsg::Load(path) => load::load(model, path),
        DocumentMsg::Reload => load::reload(model),
        DocumentMsg::FileLoaded { revision, result } => {
            load::file_loaded(model, revision, result)
        }
        DocumentMsg::ContentChanged(text) => edit::update_content(model, text),
        DocumentMsg::ChangeDelimiter(delimiter) => edit::update_delimiter(model, delimiter),
        DocumentMsg::EditCell { row, col, value } => edit::edit_cell(model, row, col, &value),
        DocumentMsg::ParseReady { revision } => edit::parse_ready(model, revision),
        DocumentMsg::ParseCompleted { revision, result } => {
            edit::parse_completed(model, revision, result)
        }
        DocumentMsg::Save => save::save(model),
        DocumentMsg::SaveCompleted {
            path,
            content,
            result,
        } => save::save_completed(model, &path, content, result),
    }
}
