//! File access used by workers
//!
//! Workers never touch `std::fs` directly, so tests can substitute an
//! in-memory implementation.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::util::probe_file_size;

/// Byte-level access to document files
pub trait FileAccess: Send + Sync {
    /// Size in bytes, without reading the contents
    fn size(&self, path: &Path) -> io::Result<u64>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Last modification time, if the platform reports one
    fn modification_time(&self, path: &Path) -> Option<SystemTime>;
}

/// `FileAccess` backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileAccess;

impl FileAccess for StdFileAccess {
    fn size(&self, path: &Path) -> io::Result<u64> {
        probe_file_size(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        fs::write(path, content)
    }

    fn modification_time(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}
