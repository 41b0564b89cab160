//! Save handling

use std::path::Path;
use std::time::SystemTime;

use crate::commands::Cmd;
use crate::error::DocumentError;
use crate::model::DocumentModel;

/// Write the live text to the document's file
pub fn save(model: &mut DocumentModel) -> Option<Cmd> {
    if !model.has_unsaved_changes() {
        tracing::debug!("Save skipped, no unsaved changes");
        return None;
    }
    let Some(path) = model.path.clone() else {
        tracing::warn!("Save requested but document has no file");
        model.last_error = Some(DocumentError::NoPath);
        return None;
    };
    let content = model.session.as_ref()?.raw_content.clone();

    tracing::info!("Saving {} ({} bytes)", path.display(), content.len());
    Some(Cmd::SaveFile { path, content })
}

pub fn save_completed(
    model: &mut DocumentModel,
    path: &Path,
    content: String,
    result: Result<Option<SystemTime>, DocumentError>,
) -> Option<Cmd> {
    if model.path.as_deref() != Some(path) {
        tracing::debug!(
            "Ignoring save result for {}, document moved on",
            path.display()
        );
        return None;
    }

    match result {
        Ok(modified) => {
            if let Some(session) = model.session.as_mut() {
                session.mark_saved(content);
            }
            model.restamp_source(modified);
            model.last_error = None;
            tracing::info!("Saved {}", path.display());
        }
        Err(e) => {
            tracing::error!("Save failed: {}", e);
            model.last_error = Some(e);
        }
    }
    None
}
