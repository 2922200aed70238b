//! Batch orchestration - the entry point hosts call after saving files.
//!
//! One call to [`LyricsPipeline::process_batch`] handles one "files saved"
//! event:
//! 1. Extract a lookup key from each file's metadata
//! 2. Resolve lyrics through a cache shared by the whole batch
//! 3. Plan the sidecar action
//! 4. Write the sidecar atomically
//!
//! Every file yields exactly one [`BatchOutcome`]. Errors stay with their
//! file; nothing a single file does can abort the batch.

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ResultExt;
use crate::lyrics::{
    ExtractionError, LyricsApi, LyricsResult, MetadataKey, ProviderError, ResolutionCache,
};
use crate::metadata::MetadataRecord;
use crate::sidecar::{self, SidecarAction, SidecarFormat, SidecarTarget, SkipReason, WriteError};

/// A file the host just finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFile {
    pub metadata: MetadataRecord,
    /// Final on-disk path of the audio file
    pub path: PathBuf,
}

impl SavedFile {
    /// Decode a host's JSON list of saved files. Blank input is an empty batch.
    pub fn parse_list(raw: &str) -> crate::error::Result<Vec<Self>> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(raw).with_context("invalid saved-file list")
    }
}

/// Pipeline tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Lookups in flight at once
    pub concurrency: usize,
    /// Upper bound on a single lookup
    pub lookup_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            lookup_timeout: Duration::from_secs(15),
        }
    }
}

/// Per-file result of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub file_path: PathBuf,
    pub status: OutcomeStatus,
    /// Sidecar written or found up to date
    pub sidecar: Option<PathBuf>,
    pub format: Option<SidecarFormat>,
    /// Size of the sidecar that was overwritten
    pub previous_len: Option<usize>,
}

impl BatchOutcome {
    fn new(file_path: PathBuf, status: OutcomeStatus) -> Self {
        Self {
            file_path,
            status,
            sidecar: None,
            format: None,
            previous_len: None,
        }
    }

    fn failed(file_path: PathBuf, reason: impl Into<FailureReason>) -> Self {
        Self::new(file_path, OutcomeStatus::Failed(reason.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Written,
    SkippedExisting,
    NotFound,
    Failed(FailureReason),
}

/// The stage a file failed in, with its error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("metadata: {0}")]
    Extraction(ExtractionError),
    #[error("lookup: {0}")]
    Provider(ProviderError),
    #[error("write: {0}")]
    Write(WriteError),
}

impl From<ExtractionError> for FailureReason {
    fn from(e: ExtractionError) -> Self {
        Self::Extraction(e)
    }
}

impl From<ProviderError> for FailureReason {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

impl From<WriteError> for FailureReason {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

/// Lyrics resolution and sidecar pipeline.
pub struct LyricsPipeline<A> {
    api: A,
    options: PipelineOptions,
}

impl<A: LyricsApi> LyricsPipeline<A> {
    pub fn new(api: A, options: PipelineOptions) -> Self {
        Self { api, options }
    }

    /// Process one host save event.
    ///
    /// Outcomes come back in completion order, one per input file. The
    /// cache lives only for this call, so failed lookups are retried by the
    /// next batch.
    pub async fn process_batch(&self, files: Vec<SavedFile>) -> Vec<BatchOutcome> {
        if files.is_empty() {
            return Vec::new();
        }

        let total = files.len();
        tracing::info!(files = total, concurrency = self.options.concurrency, "Processing batch");

        let cache = ResolutionCache::new();
        let outcomes: Vec<BatchOutcome> = futures::stream::iter(files)
            .map(|file| self.process_file(file, &cache))
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;

        let summary = BatchSummary::from_outcomes(&outcomes);
        tracing::info!(
            files = total,
            lookups = cache.len(),
            written = summary.written,
            skipped = summary.skipped,
            not_found = summary.not_found,
            failed = summary.failed,
            "Batch complete"
        );

        outcomes
    }

    async fn process_file(&self, file: SavedFile, cache: &ResolutionCache) -> BatchOutcome {
        let SavedFile { metadata, path } = file;

        let key = match MetadataKey::extract(&metadata) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping lyrics lookup");
                return BatchOutcome::failed(path, e);
            }
        };

        let result = cache.get_or_compute(&key, || self.lookup(&key)).await;

        match sidecar::plan(&path, &result) {
            SidecarAction::WriteSynced { target, content }
            | SidecarAction::WritePlain { target, content } => {
                write_sidecar(path, target, &content)
            }
            SidecarAction::Skip(SkipReason::AlreadyUpToDate(sidecar)) => {
                tracing::info!(path = %sidecar.display(), "Sidecar already up to date");
                let format = format_of(&result);
                BatchOutcome {
                    sidecar: Some(sidecar),
                    format,
                    ..BatchOutcome::new(path, OutcomeStatus::SkippedExisting)
                }
            }
            SidecarAction::Skip(SkipReason::NotFound) => {
                BatchOutcome::new(path, OutcomeStatus::NotFound)
            }
            SidecarAction::Skip(SkipReason::ProviderFailed(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "No sidecar written");
                BatchOutcome::failed(path, e)
            }
        }
    }

    /// One provider call, bounded by the lookup timeout.
    async fn lookup(&self, key: &MetadataKey) -> LyricsResult {
        let timeout = self.options.lookup_timeout;
        match tokio::time::timeout(timeout, self.api.lookup(key)).await {
            Ok(result) => result,
            Err(_) => LyricsResult::ProviderError(ProviderError::timeout(format!(
                "no response within {}s",
                timeout.as_secs_f32()
            ))),
        }
    }
}

fn write_sidecar(audio_path: PathBuf, target: SidecarTarget, content: &str) -> BatchOutcome {
    match sidecar::write(&target.path, content.as_bytes()) {
        Ok(written) => {
            tracing::info!(
                path = %written.path.display(),
                bytes = written.bytes_written,
                replaced = ?target.existing_len(),
                "Wrote sidecar"
            );
            BatchOutcome {
                previous_len: target.existing_len(),
                format: Some(target.format),
                sidecar: Some(written.path),
                ..BatchOutcome::new(audio_path, OutcomeStatus::Written)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, kind = ?e.kind, "Failed to write sidecar");
            BatchOutcome {
                format: Some(target.format),
                ..BatchOutcome::failed(audio_path, e)
            }
        }
    }
}

fn format_of(result: &LyricsResult) -> Option<SidecarFormat> {
    match result {
        LyricsResult::Synced(_) => Some(SidecarFormat::Lrc),
        LyricsResult::Plain(_) => Some(SidecarFormat::Txt),
        LyricsResult::NotFound | LyricsResult::ProviderError(_) => None,
    }
}

/// Counts per outcome status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.status {
                    OutcomeStatus::Written => summary.written += 1,
                    OutcomeStatus::SkippedExisting => summary.skipped += 1,
                    OutcomeStatus::NotFound => summary.not_found += 1,
                    OutcomeStatus::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.written + self.skipped + self.not_found + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} written, {} up to date, {} not found, {} failed",
            self.written, self.skipped, self.not_found, self.failed
        )
    }
}
