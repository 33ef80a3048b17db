//! Loading a cycle snapshot from disk.
//!
//! Two layouts are accepted: a single JSON array of peg events, or JSON Lines
//! with one event object per line. Blank lines in JSON Lines are skipped.
//! The path `-` reads standard input.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use pegs_core::PegEvent;
use tracing::debug;

/// Read and decode the snapshot at `path`.
pub fn load_events(path: &Path) -> Result<Vec<PegEvent>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read events from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let events =
        parse_events(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), events = events.len(), "loaded snapshot");
    Ok(events)
}

/// Decode a snapshot from text.
pub fn parse_events(content: &str) -> Result<Vec<PegEvent>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).context("invalid JSON array of peg events");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<PegEvent>(line)
                .with_context(|| format!("invalid peg event on line {}", i + 1))
        })
        .collect()
}
