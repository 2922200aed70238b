//! Lyrics resolution - turns track metadata into a classified lyrics result.
//!
//! # Architecture
//!
//! Layered so LRCLIB's wire format never leaks past the adapter:
//! - **Domain models** (`domain.rs`, `key.rs`) - our types, independent of any API
//! - **API DTOs** (`lrclib/dto.rs`) - exact LRCLIB response shapes
//! - **Adapter** (`lrclib/adapter.rs`) - DTO to [`LyricsResult`] classification
//! - **Client** (`lrclib/client.rs`) - one HTTP request per lookup, never retries
//! - **Transport** (`transport.rs`) - injected HTTP trust/timeout settings
//! - **Cache** (`cache.rs`) - per-batch memoization with one in-flight call per key
//!
//! # Usage
//!
//! ```ignore
//! use lrc_sidecar::lyrics::{LrclibClient, LyricsApi, MetadataKey, TransportConfig};
//!
//! let client = LrclibClient::new(DEFAULT_ENDPOINT, &TransportConfig::default(), Default::default())?;
//! let key = MetadataKey::extract(&record)?;
//! match client.lookup(&key).await {
//!     LyricsResult::Synced(lrc) => println!("{lrc}"),
//!     other => println!("{}", other.label()),
//! }
//! ```

pub mod cache;
pub mod domain;
pub mod key;
pub mod lrclib;
pub mod traits;
pub mod transport;

pub use cache::{CacheEntry, ResolutionCache};
pub use domain::{LyricsResult, LyricsVariants, ProviderError, ProviderErrorKind};
pub use key::{ExtractionError, MetadataKey, RequiredField};
pub use lrclib::LrclibClient;
pub use traits::LyricsApi;
pub use transport::{TransportConfig, TrustMode};
