//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fetch`: Lyrics for audio files already on disk
//! - `post_save`: Host adapter reading saved files as JSON
//! - `lookup`: Single provider lookup
//! - `config`: Show or initialize the configuration file

mod config;
mod fetch;
mod lookup;
mod post_save;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::batch::{BatchOutcome, LyricsPipeline, OutcomeStatus};
use crate::config::Config;
use crate::lyrics::{LrclibClient, TrustMode};

pub use config::cmd_config;
pub use fetch::cmd_fetch;
pub use lookup::cmd_lookup;
pub use post_save::cmd_post_save;

/// Fetch lyrics from LRCLIB and save them as sidecar files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch lyrics for audio files on disk
    Fetch {
        /// Audio file or directory
        path: PathBuf,
        /// Recurse into subdirectories
        #[arg(short, long)]
        recursive: bool,
        /// Lookups in flight at once
        #[arg(long)]
        concurrency: Option<usize>,
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Process files a host just saved (JSON array on stdin or --input)
    PostSave {
        /// Read the saved files from this JSON file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Look up lyrics for a single track and print them
    Lookup {
        /// Track title
        #[arg(long)]
        title: String,
        /// Track artist
        #[arg(long)]
        artist: String,
        /// Album name
        #[arg(long)]
        album: Option<String>,
        /// Track length in seconds
        #[arg(long)]
        duration: Option<f64>,
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Show the effective configuration
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Provider overrides shared by the commands that hit the network
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Lookup endpoint
    #[arg(long, env = "LRC_SIDECAR_ENDPOINT")]
    pub endpoint: Option<String>,
    /// Per-lookup timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,
}

impl ProviderArgs {
    /// Apply the overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.lyrics.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.transport.timeout_secs = timeout;
        }
        if self.insecure {
            config.transport.trust = TrustMode::AcceptInvalidCerts;
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Fetch {
            path,
            recursive,
            concurrency,
            provider,
        } => cmd_fetch(&rt, path, *recursive, *concurrency, provider),
        Commands::PostSave { input, provider } => cmd_post_save(&rt, input.as_deref(), provider),
        Commands::Lookup {
            title,
            artist,
            album,
            duration,
            provider,
        } => cmd_lookup(&rt, title, artist, album.as_deref(), *duration, provider),
        Commands::Config { init } => cmd_config(*init),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load the configuration file and apply command-line overrides.
pub(crate) fn load_config(provider: &ProviderArgs) -> Config {
    let mut config = crate::config::load();
    provider.apply(&mut config);
    config
}

/// Build the LRCLIB client described by `config`.
pub(crate) fn build_client(config: &Config) -> anyhow::Result<LrclibClient> {
    Ok(LrclibClient::new(
        config.lyrics.endpoint.clone(),
        &config.transport,
        config.lyrics.variants(),
    )?)
}

/// Build a pipeline backed by LRCLIB.
pub(crate) fn build_pipeline(config: &Config) -> anyhow::Result<LyricsPipeline<LrclibClient>> {
    Ok(LyricsPipeline::new(
        build_client(config)?,
        config.pipeline_options(),
    ))
}

/// One human-readable line per outcome
pub(crate) fn describe_outcome(outcome: &BatchOutcome) -> String {
    let file = outcome.file_path.display();
    match &outcome.status {
        OutcomeStatus::Written => match &outcome.sidecar {
            Some(sidecar) => format!("✓ {file} → {}", sidecar.display()),
            None => format!("✓ {file}"),
        },
        OutcomeStatus::SkippedExisting => format!("= {file} (up to date)"),
        OutcomeStatus::NotFound => format!("- {file} (no lyrics found)"),
        OutcomeStatus::Failed(reason) => format!("✗ {file}: {reason}"),
    }
}

/// Collect audio files from a path (file or directory)
pub(crate) fn collect_audio_files(path: &Path, recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = if path.is_dir() {
        let max_depth = if recursive { usize::MAX } else { 1 };
        walkdir::WalkDir::new(path)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| is_audio_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        anyhow::bail!("{} does not exist", path.display());
    };
    files.sort();
    Ok(files)
}

/// Check if a path has an audio file extension
pub(crate) fn is_audio_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    matches!(
        ext.as_deref(),
        Some("mp3" | "flac" | "ogg" | "opus" | "m4a" | "wav" | "wv" | "ape")
    )
}
