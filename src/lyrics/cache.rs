//! In-memory resolution cache.
//!
//! Memoizes provider results per [`MetadataKey`] for the lifetime of one
//! batch. Failures are cached as well, so a flaky provider is hit at most
//! once per key per batch; the next batch starts empty and retries.
//!
//! Each key owns a `OnceCell`. Concurrent callers with the same key wait on
//! the same cell, which keeps at most one provider call in flight per key.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::domain::LyricsResult;
use super::key::MetadataKey;

/// A memoized provider result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: MetadataKey,
    pub result: LyricsResult,
    pub fetched_at: DateTime<Utc>,
}

/// Per-key memoization of lookups.
#[derive(Default)]
pub struct ResolutionCache {
    cells: Mutex<HashMap<MetadataKey, Arc<OnceCell<CacheEntry>>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `key`, computing it on first use.
    ///
    /// `compute` runs at most once per key, even with concurrent callers.
    pub async fn get_or_compute<F, Fut>(&self, key: &MetadataKey, compute: F) -> LyricsResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = LyricsResult>,
    {
        let cell = self.cell(key);

        if let Some(entry) = cell.get() {
            tracing::debug!(title = %key.title, artist = %key.artist, "Lyrics cache hit");
            return entry.result.clone();
        }

        let entry = cell
            .get_or_init(|| async move {
                CacheEntry {
                    key: key.clone(),
                    result: compute().await,
                    fetched_at: Utc::now(),
                }
            })
            .await;

        entry.result.clone()
    }

    /// Cached entry for `key`, if a lookup already completed.
    pub fn get(&self, key: &MetadataKey) -> Option<CacheEntry> {
        let cells = self.cells.lock();
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Number of keys seen so far.
    pub fn len(&self) -> usize {
        self.cells.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, key: &MetadataKey) -> Arc<OnceCell<CacheEntry>> {
        let mut cells = self.cells.lock();
        cells
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::domain::ProviderError;
    use crate::lyrics::traits::LyricsApi;
    use crate::lyrics::traits::mocks::MockLyrics;
    use std::time::Duration;

    fn key(title: &str) -> MetadataKey {
        MetadataKey {
            title: title.to_string(),
            artist: "Band".to_string(),
            album: Some("Album".to_string()),
            duration_secs: Some(210),
        }
    }

    #[tokio::test]
    async fn test_second_lookup_is_cached() {
        let cache = ResolutionCache::new();
        let mock = MockLyrics::always(LyricsResult::Plain("La".to_string()));

        let k = key("Song");

        let first = cache.get_or_compute(&k, || mock.lookup(&k)).await;
        let second = cache.get_or_compute(&k, || mock.lookup(&k)).await;

        assert_eq!(first, second);
        assert_eq!(mock.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_cached() {
        let cache = ResolutionCache::new();
        let mock = MockLyrics::always(LyricsResult::ProviderError(ProviderError::network(
            "connection reset",
        )));

        let k = key("Song");

        for _ in 0..3 {
            let result = cache.get_or_compute(&k, || mock.lookup(&k)).await;
            assert!(matches!(result, LyricsResult::ProviderError(_)));
        }
        assert_eq!(mock.calls(), 1);

        let entry = cache.get(&key("Song")).unwrap();
        assert_eq!(entry.key, key("Song"));
        assert!(matches!(entry.result, LyricsResult::ProviderError(_)));
    }

    #[tokio::test]
    async fn test_distinct_keys_are_fetched_separately() {
        let cache = ResolutionCache::new();
        let mock = MockLyrics::not_found();

        let k = key("Song");
        let mut other = key("Song");
        other.duration_secs = Some(211);

        cache.get_or_compute(&k, || mock.lookup(&k)).await;
        cache.get_or_compute(&other, || mock.lookup(&other)).await;

        assert_eq!(mock.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_key_single_flight() {
        let cache = ResolutionCache::new();
        let mock = MockLyrics::always(LyricsResult::Synced("[00:01.00] La".to_string()))
            .with_delay(Duration::from_millis(50));
        let k = key("Song");

        let (a, b, c) = tokio::join!(
            cache.get_or_compute(&k, || mock.lookup(&k)),
            cache.get_or_compute(&k, || mock.lookup(&k)),
            cache.get_or_compute(&k, || mock.lookup(&k)),
        );

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ResolutionCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(&key("Song")).is_none());
    }
}
