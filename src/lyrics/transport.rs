//! HTTP transport settings for the lyrics client.
//!
//! Certificate trust is deployment-specific (some embedded runtimes ship
//! without a usable certificate store), so it is configured here and passed
//! to the client instead of being decided inside it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// How server certificates are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustMode {
    /// Normal certificate chain validation
    #[default]
    Verify,
    /// Skip validation; only for hosts with a broken certificate store
    AcceptInvalidCerts,
}

/// Transport configuration injected into the lyrics client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Certificate validation mode
    pub trust: TrustMode,
    /// Per-lookup timeout in seconds
    pub timeout_secs: u64,
    /// Overrides the default `<crate>/<version>` User-Agent
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            trust: TrustMode::Verify,
            timeout_secs: 15,
            user_agent: None,
        }
    }
}

impl TransportConfig {
    /// Per-lookup timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// User-Agent sent with every request.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// Build a reqwest client honoring these settings.
    ///
    /// The client accepts gzip-compressed responses.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .gzip(true)
            .user_agent(self.user_agent())
            .timeout(self.timeout());

        if self.trust == TrustMode::AcceptInvalidCerts {
            tracing::warn!("Certificate validation disabled for lyrics requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::transport(e.to_string()))
    }
}
