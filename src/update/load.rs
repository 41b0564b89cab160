//! Load / reload handling

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::error::DocumentError;
use crate::messages::LoadedDocument;
use crate::model::{DocumentModel, DocumentState, EditSession, RenderedDocument, SourceIdentity};
use crate::pipeline::DocumentKind;

/// Start loading `path`. A load already in flight is not duplicated.
pub fn load(model: &mut DocumentModel, path: PathBuf) -> Option<Cmd> {
    if model.state == DocumentState::Loading {
        tracing::debug!(
            "Load of {} ignored, another load is in flight",
            path.display()
        );
        return None;
    }

    let revision = model.bump_revision();
    model.loading_revision = Some(revision);
    model.loading_path = Some(path.clone());
    model.pending_delimiter = None;
    model.state = DocumentState::Loading;

    let kind = DocumentKind::from_path(&path);
    // The detected or chosen delimiter sticks for the same file
    let delimiter = if model.path.as_ref() == Some(&path) {
        model.delimiter
    } else {
        None
    };

    tracing::info!("Loading {} (revision {})", path.display(), revision);

    Some(Cmd::LoadFile {
        path,
        revision,
        kind,
        delimiter,
    })
}

/// Discard edits and load the current file again
pub fn reload(model: &mut DocumentModel) -> Option<Cmd> {
    let Some(path) = model.path.clone() else {
        tracing::warn!("Reload requested but document has no file");
        return None;
    };
    load(model, path)
}

pub fn file_loaded(
    model: &mut DocumentModel,
    revision: u64,
    result: Result<Option<LoadedDocument>, DocumentError>,
) -> Option<Cmd> {
    if model.loading_revision != Some(revision) {
        tracing::debug!(
            "Discarding stale load result: revision {} (current {})",
            revision,
            model.revision
        );
        model.stats.stale_discarded += 1;
        return None;
    }
    model.loading_revision = None;
    model.loading_path = None;

    let loaded = match result {
        Ok(Some(loaded)) => loaded,
        Ok(None) => {
            tracing::debug!("Load {} was cancelled", revision);
            model.pending_delimiter = None;
            model.state = DocumentState::Idle;
            return None;
        }
        Err(e) => {
            tracing::warn!("Load failed: {}", e);
            model.pending_delimiter = None;
            model.last_error = Some(e);
            model.state = DocumentState::Error;
            return None;
        }
    };

    tracing::info!(
        "Loaded {}: {} (delimiter {})",
        loaded.path.display(),
        loaded.rendered.table.summary(),
        loaded.delimiter
    );

    let source = SourceIdentity {
        path: Some(loaded.path.clone()),
        modified: loaded.modified,
    };
    model.adopt_path(loaded.path);
    model.delimiter = Some(loaded.delimiter);
    model.session = Some(EditSession::new(loaded.content));
    model.install(RenderedDocument::new(
        source,
        loaded.rendered.table,
        loaded.rendered.markup,
    ));
    model.last_error = None;
    model.state = DocumentState::Idle;
    model.stats.loads_completed += 1;

    // A delimiter picked while loading is applied now
    match model.pending_delimiter.take() {
        Some(wanted) if Some(wanted) != model.delimiter => {
            super::edit::update_delimiter(model, wanted)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::{Delimiter, Table};
    use crate::error::SourceReason;
    use crate::messages::DocumentMsg;
    use crate::pipeline::Rendered;
    use crate::update::update;

    fn loaded(path: &str, content: &str) -> LoadedDocument {
        LoadedDocument {
            path: PathBuf::from(path),
            content: content.to_string(),
            delimiter: Delimiter::Comma,
            modified: None,
            rendered: Rendered {
                table: Table::new(vec!["a".into()], vec![], Delimiter::Comma),
                markup: format!("<markup for {}>", path),
            },
        }
    }

    #[test]
    fn test_load_issues_load_file() {
        let mut model = DocumentModel::new(10, false);
        let cmd = update(&mut model, DocumentMsg::Load(PathBuf::from("data.tsv")));

        match cmd {
            Some(Cmd::LoadFile {
                path,
                revision,
                kind,
                delimiter,
            }) => {
                assert_eq!(path, PathBuf::from("data.tsv"));
                assert_eq!(revision, 1);
                assert_eq!(
                    kind,
                    DocumentKind::Delimited {
                        hint: Some(Delimiter::Tab)
                    }
                );
                assert_eq!(delimiter, None);
            }
            other => panic!("Expected LoadFile, got {:?}", other),
        }
        assert_eq!(model.state, DocumentState::Loading);
    }

    #[test]
    fn test_second_load_while_loading_is_noop() {
        let mut model = DocumentModel::new(10, false);
        assert!(update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv"))).is_some());
        assert!(update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv"))).is_none());
        assert_eq!(model.revision, 1);
    }

    #[test]
    fn test_file_loaded_installs_document() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv")));
        let cmd = update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(Some(loaded("a.csv", "a\n"))),
            },
        );

        assert!(cmd.is_none());
        assert_eq!(model.state, DocumentState::Idle);
        assert_eq!(model.path, Some(PathBuf::from("a.csv")));
        assert_eq!(model.delimiter, Some(Delimiter::Comma));
        assert_eq!(model.current_markup(), Some("<markup for a.csv>"));
        assert!(!model.has_unsaved_changes());
        assert_eq!(model.stats.loads_completed, 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_document() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv")));
        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(Some(loaded("a.csv", "a\n"))),
            },
        );

        update(&mut model, DocumentMsg::Load(PathBuf::from("b.csv")));
        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 2,
                result: Err(DocumentError::SourceUnavailable {
                    path: PathBuf::from("b.csv"),
                    reason: SourceReason::NotFound,
                }),
            },
        );

        assert_eq!(model.state, DocumentState::Error);
        assert!(model.last_error.is_some());
        assert_eq!(model.path, Some(PathBuf::from("a.csv")));
        assert_eq!(model.current_markup(), Some("<markup for a.csv>"));

        // The coordinator is not stuck: a new load proceeds
        assert!(update(&mut model, DocumentMsg::Load(PathBuf::from("c.csv"))).is_some());
    }

    #[test]
    fn test_edit_during_load_discards_load_result() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv")));
        update(&mut model, DocumentMsg::ContentChanged("x,y".into()));

        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(Some(loaded("a.csv", "a\n"))),
            },
        );

        assert!(model.rendered.is_none());
        assert_eq!(model.session.as_ref().unwrap().raw_content, "x,y");
        assert_eq!(model.state, DocumentState::Debouncing);
        assert_eq!(model.stats.stale_discarded, 1);
    }

    #[test]
    fn test_edit_during_load_keeps_file_for_save() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.tsv")));
        update(&mut model, DocumentMsg::ContentChanged("x\ty\n".into()));
        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(Some(loaded("a.tsv", "a\n"))),
            },
        );

        assert_eq!(model.path, Some(PathBuf::from("a.tsv")));
        assert_eq!(
            model.kind,
            Some(DocumentKind::Delimited {
                hint: Some(Delimiter::Tab)
            })
        );
        match update(&mut model, DocumentMsg::Save) {
            Some(Cmd::SaveFile { path, content }) => {
                assert_eq!(path, PathBuf::from("a.tsv"));
                assert_eq!(content, "x\ty\n");
            }
            other => panic!("Expected SaveFile, got {:?}", other),
        }
        assert!(model.last_error.is_none());
    }

    #[test]
    fn test_delimiter_queued_for_failed_load_is_dropped() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("missing.csv")));
        update(&mut model, DocumentMsg::ChangeDelimiter(Delimiter::Tab));
        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Err(DocumentError::SourceUnavailable {
                    path: PathBuf::from("missing.csv"),
                    reason: SourceReason::NotFound,
                }),
            },
        );
        assert_eq!(model.pending_delimiter, None);

        update(&mut model, DocumentMsg::Load(PathBuf::from("b.csv")));
        let cmd = update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 2,
                result: Ok(Some(loaded("b.csv", "a,b\n"))),
            },
        );
        assert!(cmd.is_none());
        assert_eq!(model.delimiter, Some(Delimiter::Comma));
    }

    #[test]
    fn test_delimiter_queued_for_cancelled_load_is_dropped() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv")));
        update(&mut model, DocumentMsg::ChangeDelimiter(Delimiter::Semicolon));
        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(None),
            },
        );
        assert_eq!(model.pending_delimiter, None);
        assert_eq!(model.state, DocumentState::Idle);
    }

    #[test]
    fn test_reload_keeps_delimiter() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv")));
        update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(Some(loaded("a.csv", "a\n"))),
            },
        );
        model.delimiter = Some(Delimiter::Semicolon);

        match update(&mut model, DocumentMsg::Reload) {
            Some(Cmd::LoadFile { delimiter, .. }) => {
                assert_eq!(delimiter, Some(Delimiter::Semicolon))
            }
            other => panic!("Expected LoadFile, got {:?}", other),
        }
    }

    #[test]
    fn test_reload_without_file_is_noop() {
        let mut model = DocumentModel::new(10, false);
        assert!(update(&mut model, DocumentMsg::Reload).is_none());
    }

    #[test]
    fn test_delimiter_chosen_while_loading_is_applied() {
        let mut model = DocumentModel::new(10, false);
        update(&mut model, DocumentMsg::Load(PathBuf::from("a.csv")));
        assert!(update(&mut model, DocumentMsg::ChangeDelimiter(Delimiter::Tab)).is_none());

        let cmd = update(
            &mut model,
            DocumentMsg::FileLoaded {
                revision: 1,
                result: Ok(Some(loaded("a.csv", "a\tb\n"))),
            },
        );
        match cmd {
            Some(Cmd::RunParse { delimiter, .. }) => assert_eq!(delimiter, Delimiter::Tab),
            other => panic!("Expected RunParse, got {:?}", other),
        }
        assert_eq!(model.delimiter, Some(Delimiter::Tab));
    }
}
