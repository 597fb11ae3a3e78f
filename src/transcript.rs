//! Transcript cleaning: SRT structure in, narrative text out.
//!
//! The cleaner is a single-pass, order-preserving line filter. Cue
//! numbers, timestamp ranges, and blank lines are dropped whole;
//! surviving lines have inline `<...>` tags removed and are dropped
//! too if nothing is left. Relative line order never changes.

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::{Result, YtsumError};

/// Clean the subtitle file at `path` in place.
///
/// Fails with [`YtsumError::EmptyTranscript`] when no narrative text
/// survives; the file is left untouched in that case.
pub async fn clean_file(path: &Path) -> Result<()> {
    info!("Cleaning transcript file: {}", path.display());

    let raw = fs::read_to_string(path).await?;
    let cleaned = clean_transcript(&raw).ok_or(YtsumError::EmptyTranscript)?;
    fs::write(path, cleaned).await?;

    info!("Transcript cleaning complete");
    Ok(())
}

/// Reduce raw SRT text to narrative lines, one per line, with a single
/// trailing newline. Returns `None` when nothing survives.
pub fn clean_transcript(raw: &str) -> Option<String> {
    let mut kept = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || is_sequence_counter(line) || is_timestamp_range(line) {
            continue;
        }

        let stripped = strip_markup(line);
        let stripped = stripped.trim();
        if !stripped.is_empty() {
            kept.push(stripped.to_string());
        }
    }

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n") + "\n")
    }
}

/// A bare SRT cue number: nothing but ASCII digits.
fn is_sequence_counter(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Full-line `HH:MM:SS,mmm --> HH:MM:SS,mmm` with exact digit widths.
fn is_timestamp_range(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() == 29
        && is_timestamp(&bytes[..12])
        && &bytes[12..17] == b" --> "
        && is_timestamp(&bytes[17..])
}

fn is_timestamp(bytes: &[u8]) -> bool {
    const DIGITS: [usize; 9] = [0, 1, 3, 4, 6, 7, 9, 10, 11];
    bytes.len() == 12
        && DIGITS.iter().all(|&i| bytes[i].is_ascii_digit())
        && bytes[2] == b':'
        && bytes[5] == b':'
        && bytes[8] == b','
}

/// Remove `<...>` tags: a `<`, the shortest run of non-`>` characters,
/// and a closing `>`. A `<` that never closes is not a tag, so the
/// scanner buffers candidate tag text and restores it at end of line.
fn strip_markup(line: &str) -> String {
    let mut kept = String::with_capacity(line.len());
    let mut pending = String::new();
    let mut in_tag = false;

    for ch in line.chars() {
        if in_tag {
            if ch == '>' {
                pending.clear();
                in_tag = false;
            } else {
                pending.push(ch);
            }
        } else if ch == '<' {
            in_tag = true;
            pending.push(ch);
        } else {
            kept.push(ch);
        }
    }

    kept.push_str(&pending);
    kept
}
