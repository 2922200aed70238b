//! Internal domain models for lyrics lookups.
//!
//! These types don't change when the provider's API changes. LRCLIB responses
//! are converted into them by the adapter.

use serde::Serialize;

/// Outcome of a single provider lookup.
///
/// Failures are values, not `Err`s: a [`ProviderError`] is cached and
/// reported like any other result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum LyricsResult {
    /// Timestamped lyrics in LRC format (`[mm:ss.xx] text`)
    Synced(String),
    /// Raw lyrics text without timestamps
    Plain(String),
    /// The provider has no lyrics for this track
    NotFound,
    /// The lookup itself failed
    ProviderError(ProviderError),
}

impl LyricsResult {
    /// Short label for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Synced(_) => "synced",
            Self::Plain(_) => "plain",
            Self::NotFound => "not found",
            Self::ProviderError(_) => "provider error",
        }
    }

    /// Lyrics text, if any was found.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Synced(text) | Self::Plain(text) => Some(text),
            Self::NotFound | Self::ProviderError(_) => None,
        }
    }
}

/// Category of provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// Connection refused, DNS failure, TLS failure, reset...
    Network,
    /// Request or body read exceeded the lookup timeout
    Timeout,
    /// Body was not a recognizable lyrics payload
    Malformed,
    /// Non-success status other than 404
    ServerError,
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Malformed => "malformed response",
            Self::ServerError => "server",
        };
        f.write_str(name)
    }
}

/// A failed lookup, with enough detail to diagnose it from the logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Malformed, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::ServerError, message)
    }
}

/// Which lyrics variants a lookup may return.
///
/// A disabled variant is ignored during classification, so with
/// `synced: false` a response carrying both fields still yields `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LyricsVariants {
    pub synced: bool,
    pub plain: bool,
}

impl Default for LyricsVariants {
    fn default() -> Self {
        Self {
            synced: true,
            plain: true,
        }
    }
}
