use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::SubtitleFetcher;
use crate::preflight;
use crate::release::Releaser;
use crate::summarize::Summarizer;
use crate::tool::{ProcessRunner, ToolRunner};
use crate::transcript;

/// One video in, one summary out, strictly in stage order.
pub struct Workflow {
    config: Config,
    runner: Arc<dyn ToolRunner>,
    out: Box<dyn Write + Send>,
}

impl Workflow {
    /// Workflow backed by real subprocesses, printing to stdout.
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, Arc::new(ProcessRunner::new()))
    }

    /// Workflow with an injected tool runner.
    pub fn with_runner(config: Config, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            config,
            runner,
            out: Box::new(io::stdout()),
        }
    }

    /// Send the summary block somewhere other than stdout.
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Fail when a required tool is missing, then ping the runner
    /// service. Runs before the URL prompt so a broken installation
    /// surfaces before the user types anything.
    pub async fn check_prerequisites(&self) -> Result<()> {
        info!("Checking prerequisites");
        preflight::check_tools(self.runner.as_ref(), &self.config)?;
        preflight::probe_runner_service(self.runner.as_ref(), &self.config.runner).await;
        Ok(())
    }

    /// Run the pipeline for a single video URL: fetch, clean,
    /// summarize, release.
    ///
    /// Stages run sequentially; the first failure aborts the run.
    /// Resource release only happens after the summary has been
    /// printed and never turns a success into a failure.
    pub async fn run(&mut self, url: &str) -> Result<()> {
        // download the subtitle track
        let fetcher = SubtitleFetcher::new(
            self.config.downloader.clone(),
            self.config.transcript.path.clone(),
            Arc::clone(&self.runner),
        );
        let spinner = create_spinner("Downloading subtitles...");
        let fetched = fetcher.fetch(url).await;
        spinner.finish_and_clear();
        let transcript_path = fetched?;

        // strip SRT structure down to narrative text
        transcript::clean_file(&transcript_path).await?;

        // summarize and print between the marker lines
        let summarizer = Summarizer::new(self.config.runner.clone(), Arc::clone(&self.runner));
        let spinner = create_spinner(&format!("Summarizing with {}...", self.config.runner.model));
        let summarized = summarizer.summarize(&transcript_path).await;
        spinner.finish_and_clear();
        let summary = summarized?;

        self.out.write_all(summary_block(&summary).as_bytes())?;
        self.out.flush()?;

        // unload the model and honor the delete setting
        let releaser = Releaser::new(
            self.config.runner.clone(),
            self.config.transcript.clone(),
            Arc::clone(&self.runner),
        );
        releaser.release().await;

        info!("Run finished successfully");
        Ok(())
    }
}

/// The summary as printed on stdout, fenced by marker lines so other
/// tooling can cut it out of the stream.
fn summary_block(summary: &str) -> String {
    format!("\n--- Summary ---\n{summary}\n---------------\n")
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
