//! Decide whether and where to write a sidecar.

use std::io::ErrorKind;
use std::path::Path;

use super::{SidecarAction, SidecarFormat, SidecarTarget, SkipReason, sidecar_path};
use crate::lyrics::LyricsResult;

/// Plan the sidecar action for one audio file.
///
/// Only found lyrics can lead to a write. When the target already holds the
/// exact same bytes the plan is a skip, so the file keeps its mtime. Any other
/// existing content is replaced; the remote result is authoritative.
pub fn plan(audio_path: &Path, result: &LyricsResult) -> SidecarAction {
    let (format, content) = match result {
        LyricsResult::Synced(text) => (SidecarFormat::Lrc, text),
        LyricsResult::Plain(text) => (SidecarFormat::Txt, text),
        LyricsResult::NotFound => return SidecarAction::Skip(SkipReason::NotFound),
        LyricsResult::ProviderError(e) => {
            return SidecarAction::Skip(SkipReason::ProviderFailed(e.clone()));
        }
    };

    let path = sidecar_path(audio_path, format);
    let existing = read_existing(&path);

    if existing.as_deref() == Some(content.as_bytes()) {
        return SidecarAction::Skip(SkipReason::AlreadyUpToDate(path));
    }

    let target = SidecarTarget {
        path,
        format,
        existing,
    };
    let content = content.clone();

    match format {
        SidecarFormat::Lrc => SidecarAction::WriteSynced { target, content },
        SidecarFormat::Txt => SidecarAction::WritePlain { target, content },
    }
}

/// Read the current sidecar, treating unreadable files as absent.
///
/// An unreadable sidecar still gets a write attempt; if the directory is not
/// writable either, the writer reports that.
fn read_existing(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read existing sidecar");
            None
        }
    }
}
