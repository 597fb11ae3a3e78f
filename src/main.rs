//! ytsum - YouTube subtitle summarizer
//!
//! This is the main entry point for the ytsum application, which
//! downloads a video's English subtitles with yt-dlp, strips them to
//! plain text, and pipes the text to a local ollama model for a
//! summary.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ytsum::cli::{self, Args};
use ytsum::config::Config;
use ytsum::error::YtsumError;
use ytsum::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load ytsum.toml from current directory first
            if std::path::Path::new("ytsum.toml").exists() {
                info!("Found ytsum.toml in current directory, loading...");
                Config::from_file("ytsum.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Apply command line overrides
    if let Some(model) = args.model {
        config.runner.model = model;
    }
    if args.delete_transcript {
        config.transcript.delete_after_summary = true;
    }
    config.validate()?;

    // A missing yt-dlp or ollama should surface before the URL prompt
    let mut workflow = Workflow::new(config);
    workflow.check_prerequisites().await?;

    // Get the video URL, asking interactively when it was not given
    let url = match args.url {
        Some(url) => url.trim().to_string(),
        None => cli::prompt_for_url()?,
    };
    if url.is_empty() {
        return Err(YtsumError::MissingUrl.into());
    }

    workflow.run(&url).await?;

    info!("ytsum finished successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let ytsum_dir = std::env::current_dir()?.join(".ytsum");
    let log_dir = ytsum_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "ytsum.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console stays terse; stdout is reserved for the summary itself
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // File layer keeps the detail for debugging
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Logging initialized - console: {}, file: {}",
        log_level,
        log_dir.join("ytsum.log").display()
    );

    Ok(())
}
