//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tabview::runtime::FileAccess;
use tabview::{DocumentHandle, EngineConfig};

/// Generous upper bound for a handle to settle in tests
pub const WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
struct MemoryFile {
    bytes: Vec<u8>,
    /// Size reported by `size()`, when it should differ from the contents
    reported_size: Option<u64>,
    modified: SystemTime,
}

/// In-memory `FileAccess` for driving the coordinator without a disk
#[derive(Debug, Default)]
pub struct MemoryFiles {
    files: Mutex<HashMap<PathBuf, MemoryFile>>,
    write_error: Mutex<Option<io::ErrorKind>>,
    /// Monotonic clock for modification times
    tick: Mutex<u64>,
}

impl MemoryFiles {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_time(&self) -> SystemTime {
        let mut tick = self.tick.lock().unwrap();
        *tick += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(*tick)
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let modified = self.next_time();
        self.files.lock().unwrap().insert(
            path.into(),
            MemoryFile {
                bytes: content.into(),
                reported_size: None,
                modified,
            },
        );
    }

    /// A file whose metadata claims `size` bytes
    pub fn insert_with_reported_size(&self, path: impl Into<PathBuf>, size: u64) {
        let modified = self.next_time();
        self.files.lock().unwrap().insert(
            path.into(),
            MemoryFile {
                bytes: Vec::new(),
                reported_size: Some(size),
                modified,
            },
        );
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(Path::new(path))
            .map(|f| String::from_utf8_lossy(&f.bytes).into_owned())
    }

    pub fn remove(&self, path: &str) {
        self.files.lock().unwrap().remove(Path::new(path));
    }

    /// Make every subsequent write fail with `kind`
    pub fn fail_writes(&self, kind: io::ErrorKind) {
        *self.write_error.lock().unwrap() = Some(kind);
    }
}

impl FileAccess for MemoryFiles {
    fn size(&self, path: &Path) -> io::Result<u64> {
        let files = self.files.lock().unwrap();
        let file = files
            .get(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(file.reported_size.unwrap_or(file.bytes.len() as u64))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .map(|f| f.bytes.clone())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        if let Some(kind) = *self.write_error.lock().unwrap() {
            return Err(io::Error::from(kind));
        }
        self.insert(path, content.to_vec());
        Ok(())
    }

    fn modification_time(&self, path: &Path) -> Option<SystemTime> {
        self.files.lock().unwrap().get(path).map(|f| f.modified)
    }
}

/// Config with a short debounce so tests settle quickly
pub fn test_config() -> EngineConfig {
    EngineConfig {
        debounce_ms: 30,
        ..EngineConfig::default()
    }
}

/// Handle backed by `files`
pub fn memory_handle(files: &Arc<MemoryFiles>) -> DocumentHandle {
    DocumentHandle::with_file_access(test_config(), Arc::clone(files) as Arc<dyn FileAccess>)
}

/// Load `path` and wait for the result
pub fn loaded(files: &Arc<MemoryFiles>, path: &str) -> DocumentHandle {
    let mut handle = memory_handle(files);
    handle.load(path);
    assert!(handle.wait_idle(WAIT), "load of {} did not settle", path);
    handle
}

/// `rows` data rows of `cols` columns, comma-separated, with a header
pub fn make_csv(rows: usize, cols: usize) -> String {
    let mut out = (0..cols)
        .map(|c| format!("col{}", c))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    for r in 0..rows {
        let line = (0..cols)
            .map(|c| format!("r{}c{}", r, c))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
