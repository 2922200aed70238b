//! Adapter layer: classify LRCLIB DTOs into [`LyricsResult`]
//!
//! This is the only place LRCLIB response shapes turn into domain results.

use super::dto::{LookupBody, LyricsRecord};
use crate::lyrics::domain::{LyricsResult, LyricsVariants};

/// Classify a lookup body.
///
/// Synced lyrics win over plain lyrics; a disabled variant is treated as
/// absent. Blank fields count as absent. An empty list is `NotFound`.
pub fn classify(body: LookupBody, variants: LyricsVariants) -> LyricsResult {
    let record = match body {
        LookupBody::Record(record) => record,
        LookupBody::List(records) => match records.into_iter().next() {
            Some(first) => first,
            None => return LyricsResult::NotFound,
        },
    };

    classify_record(record, variants)
}

fn classify_record(record: LyricsRecord, variants: LyricsVariants) -> LyricsResult {
    let synced = record.synced_lyrics.filter(|s| variants.synced && has_text(s));
    if let Some(synced) = synced {
        return LyricsResult::Synced(synced);
    }

    let plain = record.plain_lyrics.filter(|s| variants.plain && has_text(s));
    if let Some(plain) = plain {
        return LyricsResult::Plain(plain);
    }

    LyricsResult::NotFound
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}
