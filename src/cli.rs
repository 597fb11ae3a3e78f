use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video URL to summarize; asked for interactively when omitted
    pub url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model passed to the runner, overriding the configured one
    #[arg(short, long)]
    pub model: Option<String>,

    /// Remove the transcript file once the summary has been printed
    #[arg(long)]
    pub delete_transcript: bool,
}

/// Ask for a video URL on standard input. The answer comes back
/// trimmed and may be empty.
pub fn prompt_for_url() -> Result<String> {
    print!("Please paste Youtube URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_url_and_overrides() {
        let args = Args::try_parse_from([
            "ytsum",
            "--model",
            "llama3.2:3b",
            "--delete-transcript",
            "https://example.com/watch?v=abc123",
        ])
        .unwrap();

        assert_eq!(args.url.as_deref(), Some("https://example.com/watch?v=abc123"));
        assert_eq!(args.model.as_deref(), Some("llama3.2:3b"));
        assert!(args.delete_transcript);
        assert!(!args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_url_is_optional() {
        let args = Args::try_parse_from(["ytsum"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.model.is_none());
        assert!(!args.delete_transcript);
    }
}
