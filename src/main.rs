//! lrc-sidecar - Lyrics sidecars for freshly saved audio files.
//!
//! Looks up lyrics on LRCLIB for each saved track and stores them next to
//! the audio file as `.lrc` (synced) or `.txt` (plain). Hosts call the
//! `post-save` command after writing files; `fetch` does the same for files
//! already on disk.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod metadata;
pub mod sidecar;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("lrc_sidecar=info".parse()?))
        .init();

    cli::run_command(&args)
}
