//! Trait definitions for the lyrics provider.
//!
//! The batch pipeline is generic over [`LyricsApi`], so tests can substitute
//! a mock that never touches the network.
//!
//! # Example
//!
//! ```ignore
//! use lrc_sidecar::lyrics::traits::LyricsApi;
//!
//! async fn fetch<T: LyricsApi>(api: &T, key: &MetadataKey) -> LyricsResult {
//!     api.lookup(key).await
//! }
//! ```

use async_trait::async_trait;

use super::domain::LyricsResult;
use super::key::MetadataKey;

/// A remote lyrics lookup.
///
/// Implementations make exactly one attempt and encode every failure in the
/// returned [`LyricsResult`].
#[async_trait]
pub trait LyricsApi: Send + Sync {
    async fn lookup(&self, key: &MetadataKey) -> LyricsResult;
}

#[async_trait]
impl LyricsApi for super::lrclib::LrclibClient {
    async fn lookup(&self, key: &MetadataKey) -> LyricsResult {
        self.lookup(key).await
    }
}

/// Mock providers for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock provider returning canned results and counting calls.
    pub struct MockLyrics {
        /// Result per track title
        pub by_title: HashMap<String, LyricsResult>,
        /// Result for titles not in `by_title`
        pub fallback: LyricsResult,
        /// Artificial latency per call
        pub delay: Option<Duration>,
        calls: AtomicUsize,
        seen: Mutex<Vec<MetadataKey>>,
    }

    impl MockLyrics {
        /// Mock that answers every lookup with the same result.
        pub fn always(result: LyricsResult) -> Self {
            Self {
                by_title: HashMap::new(),
                fallback: result,
                delay: None,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        /// Mock that knows nothing.
        pub fn not_found() -> Self {
            Self::always(LyricsResult::NotFound)
        }

        /// Add a per-title result.
        pub fn with_title(mut self, title: &str, result: LyricsResult) -> Self {
            self.by_title.insert(title.to_string(), result);
            self
        }

        /// Sleep this long inside every lookup.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Number of lookups performed.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Keys looked up, in call order.
        pub fn seen(&self) -> Vec<MetadataKey> {
            self.seen.lock().clone()
        }
    }

    #[async_trait]
    impl LyricsApi for MockLyrics {
        async fn lookup(&self, key: &MetadataKey) -> LyricsResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push(key.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.by_title
                .get(&key.title)
                .cloned()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn key(title: &str) -> MetadataKey {
            MetadataKey {
                title: title.to_string(),
                artist: "Band".to_string(),
                album: None,
                duration_secs: None,
            }
        }

        #[tokio::test]
        async fn test_mock_per_title() {
            let mock = MockLyrics::not_found()
                .with_title("Song", LyricsResult::Plain("La".to_string()));

            assert_eq!(mock.lookup(&key("Song")).await, LyricsResult::Plain("La".to_string()));
            assert_eq!(mock.lookup(&key("Other")).await, LyricsResult::NotFound);
            assert_eq!(mock.calls(), 2);
            assert_eq!(mock.seen()[1].title, "Other");
        }
    }
}
