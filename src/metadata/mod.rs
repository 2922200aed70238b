//! Track metadata records as handed over by the host.
//!
//! A [`MetadataRecord`] is the loose, host-shaped view of a saved file's tags:
//! every field is optional and `~length` may be either a formatted string
//! (`"3:30"`) or a number of seconds. Normalization into a lookup key happens
//! in [`crate::lyrics::key`].
//!
//! For the standalone CLI, [`read`] builds the same record from an audio file
//! on disk using lofty. Tags are only ever read here, never written.

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Metadata of one saved file, as exposed by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// Track length (`~length` in the host's naming)
    #[serde(default, rename = "~length", alias = "length")]
    pub length: Option<TrackLength>,
}

/// Track length in one of the shapes hosts use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackLength {
    /// Plain seconds, possibly fractional
    Seconds(f64),
    /// `m:ss`, `h:mm:ss` or a bare number of seconds as text
    Formatted(String),
}

impl TrackLength {
    /// Length in seconds, or `None` if it can't be interpreted.
    pub fn seconds(&self) -> Option<f64> {
        let secs = match self {
            Self::Seconds(secs) => *secs,
            Self::Formatted(text) => parse_formatted_length(text)?,
        };
        (secs.is_finite() && secs >= 0.0).then_some(secs)
    }
}

/// Parse `ss`, `m:ss` or `h:mm:ss` (seconds may be fractional).
fn parse_formatted_length(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    let (last, rest) = parts.split_last()?;

    let mut secs: f64 = last.trim().parse().ok()?;
    for (i, part) in rest.iter().rev().enumerate() {
        let value: u64 = part.trim().parse().ok()?;
        secs += value as f64 * 60f64.powi(i as i32 + 1);
    }
    Some(secs)
}

/// Read a metadata record from an audio file's tags.
///
/// Missing tags become `None`; the extractor decides whether that is fatal.
pub fn read(path: &Path) -> Result<MetadataRecord> {
    let tagged_file = Probe::open(path)
        .map_err(|e| Error::metadata(path, format!("failed to open file: {e}")))?
        .read()
        .map_err(|e| Error::metadata(path, format!("failed to read tags: {e}")))?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let title = tag.and_then(|t| t.title().map(|s| s.to_string()));
    let artist = tag.and_then(|t| t.artist().map(|s| s.to_string()));
    let album = tag.and_then(|t| t.album().map(|s| s.to_string()));

    let duration = tagged_file.properties().duration();
    let length = (!duration.is_zero()).then(|| TrackLength::Seconds(duration.as_secs_f64()));

    Ok(MetadataRecord {
        title,
        artist,
        album,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(TrackLength::Formatted("3:30".into()).seconds(), Some(210.0));
        assert_eq!(TrackLength::Formatted("0:05".into()).seconds(), Some(5.0));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(
            TrackLength::Formatted("1:02:03".into()).seconds(),
            Some(3723.0)
        );
    }

    #[test]
    fn test_parse_bare_seconds() {
        assert_eq!(TrackLength::Formatted("209.6".into()).seconds(), Some(209.6));
        assert_eq!(TrackLength::Seconds(42.0).seconds(), Some(42.0));
    }

    #[test]
    fn test_unparseable_length() {
        assert_eq!(TrackLength::Formatted("".into()).seconds(), None);
        assert_eq!(TrackLength::Formatted("abc".into()).seconds(), None);
        assert_eq!(TrackLength::Formatted("1:2:3:4".into()).seconds(), None);
        assert_eq!(TrackLength::Formatted("-5".into()).seconds(), None);
        assert_eq!(TrackLength::Seconds(f64::NAN).seconds(), None);
    }

    #[test]
    fn test_record_from_host_json() {
        let json = r#"{"title": "Song", "artist": "Band", "album": "Album", "~length": "3:30"}"#;
        let record: MetadataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.length, Some(TrackLength::Formatted("3:30".into())));

        let json = r#"{"title": "Song", "length": 210}"#;
        let record: MetadataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.length, Some(TrackLength::Seconds(210.0)));
        assert!(record.artist.is_none());
    }

    #[test]
    fn test_read_rejects_non_audio() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("not-audio.flac");
        std::fs::write(&path, b"definitely not flac").unwrap();

        let err = read(&path).unwrap_err();
        assert!(matches!(err, Error::Metadata { .. }));
    }
}
