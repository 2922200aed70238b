//! Lookup key extraction.

use serde::Serialize;

use crate::metadata::MetadataRecord;

/// Normalized lookup key for one track.
///
/// Equality is exact on every field, which is what the resolution cache keys
/// on. Title and artist are trimmed but case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MetadataKey {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Whole seconds; only a disambiguation hint for the provider
    pub duration_secs: Option<u32>,
}

/// Metadata field a lookup can't do without
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Title,
    Artist,
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Artist => "artist",
        })
    }
}

/// Why a record could not be turned into a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", content = "field", rename_all = "snake_case")]
pub enum ExtractionError {
    #[error("missing required field: {0}")]
    MissingRequiredField(RequiredField),
}

impl MetadataKey {
    /// Derive a lookup key from a metadata record.
    ///
    /// Fails only when title or artist is missing or blank. An unusable
    /// length is dropped, never an error.
    pub fn extract(record: &MetadataRecord) -> Result<Self, ExtractionError> {
        let title = normalized(record.title.as_deref())
            .ok_or(ExtractionError::MissingRequiredField(RequiredField::Title))?;
        let artist = normalized(record.artist.as_deref())
            .ok_or(ExtractionError::MissingRequiredField(RequiredField::Artist))?;
        let album = normalized(record.album.as_deref());

        let duration_secs = match &record.length {
            Some(length) => match length.seconds() {
                Some(secs) => Some(secs.round().min(u32::MAX as f64) as u32),
                None => {
                    tracing::warn!(?length, %title, "Ignoring unparseable track length");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            title,
            artist,
            album,
            duration_secs,
        })
    }
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TrackLength;
    use crate::test_utils::record;
    use proptest::prelude::*;

    #[test]
    fn test_extract_full_record() {
        let key = MetadataKey::extract(&record("Song", "Band", Some("Album"), Some("3:30"))).unwrap();
        assert_eq!(key.title, "Song");
        assert_eq!(key.artist, "Band");
        assert_eq!(key.album.as_deref(), Some("Album"));
        assert_eq!(key.duration_secs, Some(210));
    }

    #[test]
    fn test_extract_trims_and_keeps_case() {
        let key =
            MetadataKey::extract(&record("  Song Title ", "\tThe BAND", Some("   "), None)).unwrap();
        assert_eq!(key.title, "Song Title");
        assert_eq!(key.artist, "The BAND");
        assert_eq!(key.album, None);
        assert_eq!(key.duration_secs, None);
    }

    #[test]
    fn test_missing_title() {
        let mut rec = record("x", "Band", None, None);
        rec.title = None;
        assert_eq!(
            MetadataKey::extract(&rec),
            Err(ExtractionError::MissingRequiredField(RequiredField::Title))
        );
    }

    #[test]
    fn test_blank_artist() {
        let rec = record("Song", "   ", None, None);
        assert_eq!(
            MetadataKey::extract(&rec),
            Err(ExtractionError::MissingRequiredField(RequiredField::Artist))
        );
    }

    #[test]
    fn test_duration_rounds_to_whole_seconds() {
        let mut rec = record("Song", "Band", None, None);
        rec.length = Some(TrackLength::Seconds(209.5));
        assert_eq!(MetadataKey::extract(&rec).unwrap().duration_secs, Some(210));

        rec.length = Some(TrackLength::Seconds(209.4));
        assert_eq!(MetadataKey::extract(&rec).unwrap().duration_secs, Some(209));
    }

    #[test]
    fn test_bad_duration_is_not_fatal() {
        let key = MetadataKey::extract(&record("Song", "Band", None, Some("soon"))).unwrap();
        assert_eq!(key.duration_secs, None);
    }

    #[test]
    fn test_keys_compare_case_sensitively() {
        let a = MetadataKey::extract(&record("Song", "Band", None, None)).unwrap();
        let b = MetadataKey::extract(&record("song", "Band", None, None)).unwrap();
        let c = MetadataKey::extract(&record(" Song ", "Band", None, None)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    proptest! {
        #[test]
        fn prop_blank_title_never_extracts(
            title in "[ \t]*",
            artist in ".*",
            album in proptest::option::of(".*"),
        ) {
            let rec = MetadataRecord {
                title: Some(title),
                artist: Some(artist),
                album,
                length: None,
            };
            prop_assert_eq!(
                MetadataKey::extract(&rec),
                Err(ExtractionError::MissingRequiredField(RequiredField::Title))
            );
        }

        #[test]
        fn prop_missing_artist_never_extracts(title in "[a-zA-Z0-9]{1,20}", secs in 0.0f64..10_000.0) {
            let rec = MetadataRecord {
                title: Some(title),
                artist: None,
                album: None,
                length: Some(TrackLength::Seconds(secs)),
            };
            prop_assert_eq!(
                MetadataKey::extract(&rec),
                Err(ExtractionError::MissingRequiredField(RequiredField::Artist))
            );
        }
    }
}
