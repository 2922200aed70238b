//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lrc-sidecar\config.toml
//! - macOS: ~/Library/Application Support/lrc-sidecar/config.toml
//! - Linux: ~/.config/lrc-sidecar/config.toml
//!
//! Every section is optional. Missing keys fall back to defaults, so a host
//! only has to write the options it actually changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::batch::PipelineOptions;
use crate::lyrics::{LyricsVariants, TransportConfig};
use crate::lyrics::lrclib::DEFAULT_ENDPOINT;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lyrics provider settings
    pub lyrics: LyricsConfig,

    /// HTTP transport settings (trust mode, timeout)
    pub transport: TransportConfig,

    /// Batch processing settings
    pub batch: BatchConfig,
}

/// Lyrics provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// Lookup endpoint (LRCLIB `get` API)
    pub endpoint: String,

    /// Write synced lyrics as `.lrc`
    pub synced: bool,

    /// Write plain lyrics as `.txt`
    pub plain: bool,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            synced: true,
            plain: true,
        }
    }
}

impl LyricsConfig {
    /// Which lyrics variants the provider should consider.
    pub fn variants(&self) -> LyricsVariants {
        LyricsVariants {
            synced: self.synced,
            plain: self.plain,
        }
    }
}

/// Batch processing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of lookups in flight at once (1 = sequential)
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

impl Config {
    /// Pipeline options derived from the batch and transport sections.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            concurrency: self.batch.concurrency.max(1),
            lookup_timeout: self.transport.timeout(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lrc-sidecar"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write to temp, then rename
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
