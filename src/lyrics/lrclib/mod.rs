//! LRCLIB integration
//!
//! LRCLIB is a free lyrics database serving both synced (LRC) and plain
//! lyrics. No API key required.
//! API docs: https://lrclib.net/docs

mod adapter;
mod client;
pub mod dto;

pub use adapter::classify;
pub use client::{DEFAULT_ENDPOINT, LrclibClient};
