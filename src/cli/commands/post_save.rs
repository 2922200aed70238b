//! Host adapter: process files the host just saved.
//!
//! Input is a JSON array of saved files:
//!
//! ```json
//! [{"path": "/music/A/01.flac",
//!   "metadata": {"title": "Song", "artist": "Band", "album": "A", "~length": "3:30"}}]
//! ```
//!
//! The outcomes are printed to stdout as a JSON array, one per input file.

use std::io::{Read, Write};
use std::path::Path;
use tokio::runtime::Runtime;

use crate::batch::SavedFile;
use crate::error::ResultExt;

use super::{ProviderArgs, build_pipeline, load_config};

pub fn cmd_post_save(
    rt: &Runtime,
    input: Option<&Path>,
    provider: &ProviderArgs,
) -> anyhow::Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(format!("failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .with_context("failed to read stdin")?;
            raw
        }
    };

    let files = SavedFile::parse_list(&raw)?;
    let config = load_config(provider);
    let pipeline = build_pipeline(&config)?;
    let outcomes = rt.block_on(pipeline.process_batch(files));

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &outcomes)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::batch::SavedFile;
    use crate::error::Error;
    use crate::lyrics::MetadataKey;
    use std::path::PathBuf;

    #[test]
    fn test_parse_host_payload() {
        let raw = r#"[
            {"path": "/music/A/01.flac",
             "metadata": {"title": "Song", "artist": "Band", "album": "A", "~length": "3:30"}},
            {"path": "/music/A/02.flac",
             "metadata": {"title": "Other", "artist": "Band", "length": 187.4}}
        ]"#;

        let files = SavedFile::parse_list(raw).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("/music/A/01.flac"));

        let first = MetadataKey::extract(&files[0].metadata).unwrap();
        assert_eq!(first.duration_secs, Some(210));
        let second = MetadataKey::extract(&files[1].metadata).unwrap();
        assert_eq!(second.duration_secs, Some(187));
        assert_eq!(second.album, None);
    }

    #[test]
    fn test_missing_fields_still_parse() {
        let files =
            SavedFile::parse_list(r#"[{"path": "/music/x.mp3", "metadata": {}}]"#).unwrap();
        assert_eq!(files[0].metadata.title, None);
        assert!(MetadataKey::extract(&files[0].metadata).is_err());
    }

    #[test]
    fn test_blank_input_is_empty_batch() {
        assert!(SavedFile::parse_list("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = SavedFile::parse_list("{not json").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(SavedFile::parse_list(r#"{"path": "/x.flac"}"#).is_err());
    }
}
