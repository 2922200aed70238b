//! LRCLIB HTTP client
//!
//! One lookup is exactly one `GET` request. The client never retries and
//! never returns `Err`: every failure becomes a
//! [`LyricsResult::ProviderError`] so it can be cached and reported per file.
//!
//! ## Status handling
//! - `200` with a body: classified by the adapter
//! - `404`: the track is unknown to LRCLIB, so `NotFound`
//! - anything else: `ServerError`

use super::{adapter, dto};
use crate::error::Result;
use crate::lyrics::domain::{LyricsResult, LyricsVariants, ProviderError};
use crate::lyrics::key::MetadataKey;
use crate::lyrics::transport::TransportConfig;

/// LRCLIB exact-match lookup endpoint
pub const DEFAULT_ENDPOINT: &str = "https://lrclib.net/api/get";

/// LRCLIB API client
pub struct LrclibClient {
    http_client: reqwest::Client,
    endpoint: String,
    variants: LyricsVariants,
}

impl LrclibClient {
    /// Create a client using the given transport settings.
    pub fn new(
        endpoint: impl Into<String>,
        transport: &TransportConfig,
        variants: LyricsVariants,
    ) -> Result<Self> {
        Ok(Self::with_http_client(
            transport.build_client()?,
            endpoint,
            variants,
        ))
    }

    /// Create a client around an already configured reqwest client.
    pub fn with_http_client(
        http_client: reqwest::Client,
        endpoint: impl Into<String>,
        variants: LyricsVariants,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            variants,
        }
    }

    /// Look up lyrics for a key.
    pub async fn lookup(&self, key: &MetadataKey) -> LyricsResult {
        tracing::info!(
            title = %key.title,
            artist = %key.artist,
            album = ?key.album,
            duration = ?key.duration_secs,
            "Requesting lyrics"
        );

        let result = match self.fetch(key).await {
            Ok(Some(body)) => adapter::classify(body, self.variants),
            Ok(None) => LyricsResult::NotFound,
            Err(e) => LyricsResult::ProviderError(e),
        };

        match &result {
            LyricsResult::Synced(text) | LyricsResult::Plain(text) => tracing::info!(
                title = %key.title,
                kind = result.label(),
                chars = text.chars().count(),
                "Lyrics found"
            ),
            LyricsResult::NotFound => {
                tracing::info!(title = %key.title, "No lyrics found")
            }
            LyricsResult::ProviderError(e) => {
                tracing::warn!(title = %key.title, error = %e, "Lyrics lookup failed")
            }
        }

        result
    }

    /// Send the request; `Ok(None)` means the provider answered 404.
    async fn fetch(&self, key: &MetadataKey) -> std::result::Result<Option<dto::LookupBody>, ProviderError> {
        let url = self.build_url(key);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::server(format!(
                "HTTP {}: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body.chars().take(200).collect::<String>()
            )));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;

        serde_json::from_slice::<dto::LookupBody>(&bytes)
            .map(Some)
            .map_err(|e| ProviderError::malformed(e.to_string()))
    }

    /// Build the lookup URL; album and duration are only sent when known.
    fn build_url(&self, key: &MetadataKey) -> String {
        let mut url = format!(
            "{}?track_name={}&artist_name={}",
            self.endpoint,
            urlencoding::encode(&key.title),
            urlencoding::encode(&key.artist)
        );

        if let Some(album) = &key.album {
            url.push_str(&format!("&album_name={}", urlencoding::encode(album)));
        }

        if let Some(duration) = key.duration_secs {
            url.push_str(&format!("&duration={}", duration));
        }

        url
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout(e.to_string())
    } else if e.is_decode() {
        ProviderError::malformed(e.to_string())
    } else {
        ProviderError::network(e.to_string())
    }
}
