//! Lyrics sidecar files next to audio files.
//!
//! A sidecar shares the audio file's directory and base name; only the
//! extension differs:
//! - `.lrc` for synced lyrics (`[mm:ss.xx] text` per line)
//! - `.txt` for plain lyrics
//!
//! Planning (what to write, if anything) and writing (how to put bytes on
//! disk safely) are separate steps so each can be tested without the other.

mod planner;
mod writer;

pub use planner::plan;
pub use writer::{WriteError, WriteErrorKind, WriteOutcome, write};

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::lyrics::ProviderError;

/// Sidecar file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidecarFormat {
    /// Synced lyrics
    Lrc,
    /// Plain lyrics
    Txt,
}

impl SidecarFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Lrc => "lrc",
            Self::Txt => "txt",
        }
    }
}

/// Sidecar path for an audio file.
///
/// Same directory, same base name, extension replaced.
pub fn sidecar_path(audio_path: &Path, format: SidecarFormat) -> PathBuf {
    audio_path.with_extension(format.extension())
}

/// Where a sidecar goes and what is there now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarTarget {
    pub path: PathBuf,
    pub format: SidecarFormat,
    /// Bytes of the sidecar already on disk, if any
    pub existing: Option<Vec<u8>>,
}

impl SidecarTarget {
    /// Length of the sidecar being replaced.
    pub fn existing_len(&self) -> Option<usize> {
        self.existing.as_ref().map(Vec::len)
    }
}

/// What the planner decided for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarAction {
    WriteSynced {
        target: SidecarTarget,
        content: String,
    },
    WritePlain {
        target: SidecarTarget,
        content: String,
    },
    Skip(SkipReason),
}

/// Why no sidecar is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The sidecar already holds exactly this content
    AlreadyUpToDate(PathBuf),
    /// The provider has no lyrics for the track
    NotFound,
    /// The lookup failed; existing sidecars are left alone
    ProviderFailed(ProviderError),
}
