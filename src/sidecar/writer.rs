//! Atomic sidecar writes.
//!
//! Content is staged in a uniquely named hidden file in the target directory,
//! flushed, and renamed over the target. Readers see either the old sidecar
//! or the new one, never a partial file. The directory must already exist.

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A completed write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Category of write failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteErrorKind {
    Permission,
    Disk,
    Other,
}

impl WriteErrorKind {
    fn from_io(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => Self::Permission,
            ErrorKind::StorageFull | ErrorKind::QuotaExceeded | ErrorKind::FileTooLarge => {
                Self::Disk
            }
            _ => Self::Other,
        }
    }
}

/// A failed sidecar write. The previous sidecar, if any, is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("failed to write {}: {message}", .path.display())]
pub struct WriteError {
    pub kind: WriteErrorKind,
    pub path: PathBuf,
    pub message: String,
}

impl WriteError {
    fn from_io(path: &Path, e: &std::io::Error) -> Self {
        Self {
            kind: WriteErrorKind::from_io(e.kind()),
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

/// Atomically replace `path` with `content`.
pub fn write(path: &Path, content: &[u8]) -> Result<WriteOutcome, WriteError> {
    let staging = staging_path(path);

    if let Err(e) = stage(&staging, content) {
        let _ = fs::remove_file(&staging);
        return Err(WriteError::from_io(path, &e));
    }

    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(WriteError::from_io(path, &e));
    }

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        bytes_written: content.len(),
    })
}

fn stage(staging: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(staging)?;
    file.write_all(content)?;
    file.sync_all()
}

/// `.<file name>.<random>.tmp` next to the target.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{:08x}.tmp", name, rand::random::<u32>()))
}
