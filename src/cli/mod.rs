//! Command-line interface for lrc-sidecar.
//!
//! This module provides the host adapter (`post-save`) along with commands
//! for fetching lyrics for files on disk, single lookups, and configuration.

mod commands;

pub use commands::{Cli, Commands, ProviderArgs, run_command};
