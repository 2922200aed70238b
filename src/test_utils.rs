//! Test utilities and fixtures for lrc-sidecar tests.
//!
//! # Example
//!
//! ```ignore
//! use lrc_sidecar::test_utils::{fake_audio, record};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let temp = tempfile::TempDir::new().unwrap();
//!     let audio = fake_audio(temp.path(), "01.flac");
//!     let meta = record("Song", "Band", Some("Album"), Some("3:30"));
//!     // ... test logic
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::batch::SavedFile;
use crate::metadata::{MetadataRecord, TrackLength};

/// Build a metadata record the way a host hands it over.
///
/// `length` uses the host's text form (`"3:30"`).
pub fn record(
    title: &str,
    artist: &str,
    album: Option<&str>,
    length: Option<&str>,
) -> MetadataRecord {
    MetadataRecord {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: album.map(String::from),
        length: length.map(|l| TrackLength::Formatted(l.to_string())),
    }
}

/// Create a placeholder audio file and return its path.
///
/// The pipeline never reads audio bytes, so any content will do.
pub fn fake_audio(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"not really audio").expect("Failed to create fake audio file");
    path
}

/// A saved file with a fully tagged record.
pub fn saved(path: PathBuf, title: &str) -> SavedFile {
    SavedFile {
        metadata: record(title, "Band", Some("Album"), Some("3:30")),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fixture() {
        let rec = record("Song", "Band", None, Some("3:30"));
        assert_eq!(rec.title.as_deref(), Some("Song"));
        assert_eq!(rec.album, None);
        assert_eq!(rec.length.and_then(|l| l.seconds()), Some(210.0));
    }

    #[test]
    fn test_fake_audio_exists() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = fake_audio(temp.path(), "01.flac");
        assert!(path.is_file());
        assert_eq!(path.parent(), Some(temp.path()));
    }
}
