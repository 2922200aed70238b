//! Single provider lookup.

use tokio::runtime::Runtime;

use crate::lyrics::{LyricsResult, MetadataKey};
use crate::metadata::{MetadataRecord, TrackLength};

use super::{ProviderArgs, build_client, load_config};

/// Look up one track and print its lyrics to stdout
pub fn cmd_lookup(
    rt: &Runtime,
    title: &str,
    artist: &str,
    album: Option<&str>,
    duration: Option<f64>,
    provider: &ProviderArgs,
) -> anyhow::Result<()> {
    let record = MetadataRecord {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: album.map(String::from),
        length: duration.map(TrackLength::Seconds),
    };
    let key = MetadataKey::extract(&record)?;

    let config = load_config(provider);
    let client = build_client(&config)?;

    match rt.block_on(client.lookup(&key)) {
        LyricsResult::Synced(text) | LyricsResult::Plain(text) => {
            println!("{text}");
            Ok(())
        }
        LyricsResult::NotFound => {
            anyhow::bail!("no lyrics found for {} - {}", key.artist, key.title)
        }
        LyricsResult::ProviderError(e) => Err(e.into()),
    }
}
