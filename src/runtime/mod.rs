//! Runtime - executes commands on worker threads
//!
//! Every command that does work runs on its own thread and sends exactly one
//! `DocumentMsg` back over the channel. Workers see the coordinator's latest
//! revision through a shared atomic and give up early once they are stale.

mod files;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::config::EngineConfig;
use crate::csv::{check_size, Delimiter, ParseError};
use crate::error::DocumentError;
use crate::messages::{DocumentMsg, LoadedDocument};
use crate::pipeline::{parse_and_render, DocumentKind};

pub use files::{FileAccess, StdFileAccess};

pub struct Runtime {
    msg_tx: Sender<DocumentMsg>,
    msg_rx: Receiver<DocumentMsg>,
    files: Arc<dyn FileAccess>,
    config: Arc<EngineConfig>,
    latest_revision: Arc<AtomicU64>,
    /// Tasks spawned whose message has not been received yet
    in_flight: usize,
}

impl Runtime {
    pub fn new(config: Arc<EngineConfig>, files: Arc<dyn FileAccess>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            msg_tx,
            msg_rx,
            files,
            config,
            latest_revision: Arc::new(AtomicU64::new(0)),
            in_flight: 0,
        }
    }

    /// Publish the coordinator's current revision to running workers
    pub fn set_latest_revision(&self, revision: u64) {
        self.latest_revision.store(revision, Ordering::Release);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Next worker message, if one is waiting
    pub fn try_next(&mut self) -> Option<DocumentMsg> {
        let msg = self.msg_rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(msg)
    }

    /// Next worker message, waiting at most `timeout`
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<DocumentMsg> {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(msg)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Start the work described by `cmd`
    pub fn execute(&mut self, cmd: Cmd) {
        self.in_flight += 1;
        self.process_cmd(cmd);
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::LoadFile {
                path,
                revision,
                kind,
                delimiter,
            } => {
                let tx = self.msg_tx.clone();
                let files = Arc::clone(&self.files);
                let config = Arc::clone(&self.config);
                let latest = Arc::clone(&self.latest_revision);
                self.spawn(move || {
                    let is_cancelled = || latest.load(Ordering::Acquire) != revision;
                    let started = Instant::now();
                    let result = run_load(
                        files.as_ref(),
                        &config,
                        &path,
                        kind,
                        delimiter,
                        is_cancelled,
                    );
                    tracing::debug!(
                        "Load of {} took {:?}",
                        path.display(),
                        started.elapsed()
                    );
                    let _ = tx.send(DocumentMsg::FileLoaded { revision, result });
                });
            }
            Cmd::DebouncedParse { revision, delay_ms } => {
                let tx = self.msg_tx.clone();
                self.spawn(move || {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                    let _ = tx.send(DocumentMsg::ParseReady { revision });
                });
            }
            Cmd::RunParse {
                revision,
                source,
                delimiter,
                path,
            } => {
                let tx = self.msg_tx.clone();
                let config = Arc::clone(&self.config);
                let latest = Arc::clone(&self.latest_revision);
                self.spawn(move || {
                    let is_cancelled = || latest.load(Ordering::Acquire) != revision;
                    let started = Instant::now();
                    let result = parse_and_render(
                        &source,
                        delimiter,
                        &config.limits,
                        &config.render,
                        is_cancelled,
                    )
                    .map_err(|e| DocumentError::from_parse(path.as_deref(), e));
                    tracing::debug!(
                        "Parse + render of revision {} took {:?}",
                        revision,
                        started.elapsed()
                    );
                    let _ = tx.send(DocumentMsg::ParseCompleted { revision, result });
                });
            }
            Cmd::SaveFile { path, content } => {
                let tx = self.msg_tx.clone();
                let files = Arc::clone(&self.files);
                self.spawn(move || {
                    let result = files
                        .write(&path, content.as_bytes())
                        .map(|()| files.modification_time(&path))
                        .map_err(|e| DocumentError::write_failed(&path, &e));
                    let _ = tx.send(DocumentMsg::SaveCompleted {
                        path,
                        content,
                        result,
                    });
                });
            }
        }
    }

    fn spawn(&self, task: impl FnOnce() + Send + 'static) {
        std::thread::spawn(task);
    }
}

/// Read, size-check, detect, parse and render one file
fn run_load(
    files: &dyn FileAccess,
    config: &EngineConfig,
    path: &Path,
    kind: DocumentKind,
    delimiter: Option<Delimiter>,
    is_cancelled: impl Fn() -> bool,
) -> Result<Option<LoadedDocument>, DocumentError> {
    let too_large = |e: ParseError| DocumentError::from_parse(Some(path), e);

    let size = files
        .size(path)
        .map_err(|e| DocumentError::read_failed(path, &e))?;
    check_size(size, &config.limits).map_err(too_large)?;

    let bytes = files
        .read(path)
        .map_err(|e| DocumentError::read_failed(path, &e))?;
    // The file may have grown since the size probe
    check_size(bytes.len() as u64, &config.limits).map_err(too_large)?;

    if is_cancelled() {
        return Ok(None);
    }

    let content = String::from_utf8_lossy(&bytes).into_owned();
    let delimiter = delimiter.unwrap_or_else(|| kind.initial_delimiter(&content));
    tracing::debug!("Parsing {} with {} delimiter", path.display(), delimiter);

    let Some(rendered) = parse_and_render(
        &content,
        delimiter,
        &config.limits,
        &config.render,
        is_cancelled,
    )
    .map_err(too_large)?
    else {
        return Ok(None);
    };

    Ok(Some(LoadedDocument {
        path: path.to_path_buf(),
        content,
        delimiter,
        modified: files.modification_time(path),
        rendered,
    }))
}
