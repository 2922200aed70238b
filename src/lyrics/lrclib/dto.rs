//! LRCLIB API Data Transfer Objects
//!
//! These types match what the `/api/get` endpoint returns. Don't use them
//! outside the lrclib module; convert to [`LyricsResult`] through the adapter.
//!
//! [`LyricsResult`]: crate::lyrics::LyricsResult
//!
//! Example response:
//! ```json
//! {
//!   "id": 3396226,
//!   "trackName": "I Want to Live",
//!   "artistName": "Borislav Slavov",
//!   "albumName": "Baldur's Gate 3 (Original Game Soundtrack)",
//!   "duration": 233,
//!   "instrumental": false,
//!   "plainLyrics": "I feel your breath upon my neck\n...",
//!   "syncedLyrics": "[00:17.12] I feel your breath upon my neck\n..."
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Body of a lookup response.
///
/// The `get` endpoint answers with a single record, but some deployments and
/// proxies answer with a search-style list instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LookupBody {
    List(Vec<LyricsRecord>),
    Record(LyricsRecord),
}

/// One LRCLIB lyrics record
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsRecord {
    /// LRCLIB record ID
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    /// Track duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// True for instrumental tracks (both lyrics fields are then null)
    #[serde(default)]
    pub instrumental: Option<bool>,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}
