//! Lyrics for audio files already on disk.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::batch::{BatchSummary, SavedFile};
use crate::metadata;

use super::{ProviderArgs, build_pipeline, collect_audio_files, describe_outcome, load_config};

/// Read tags from every audio file under `path` and run them as one batch
pub fn cmd_fetch(
    rt: &Runtime,
    path: &Path,
    recursive: bool,
    concurrency: Option<usize>,
    provider: &ProviderArgs,
) -> anyhow::Result<()> {
    let mut config = load_config(provider);
    if let Some(concurrency) = concurrency {
        config.batch.concurrency = concurrency;
    }

    let paths = collect_audio_files(path, recursive)?;
    if paths.is_empty() {
        println!("No audio files found in {}", path.display());
        return Ok(());
    }

    let mut unreadable = 0;
    let files: Vec<SavedFile> = paths
        .into_iter()
        .filter_map(|path| match metadata::read(&path) {
            Ok(metadata) => Some(SavedFile { metadata, path }),
            Err(e) => {
                eprintln!("✗ {e}");
                unreadable += 1;
                None
            }
        })
        .collect();

    println!("Fetching lyrics for {} files...", files.len());
    println!();

    let pipeline = build_pipeline(&config)?;
    let outcomes = rt.block_on(pipeline.process_batch(files));

    for outcome in &outcomes {
        println!("{}", describe_outcome(outcome));
    }

    println!();
    println!("{}", BatchSummary::from_outcomes(&outcomes));
    if unreadable > 0 {
        println!("{unreadable} files skipped (unreadable tags)");
    }

    Ok(())
}
