use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, YtsumError};

// Default values matching the stock yt-dlp + ollama setup
fn default_downloader_binary() -> String {
    "yt-dlp".to_string()
}

fn default_runner_binary() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "gemma3:12b".to_string()
}

fn default_prompt() -> String {
    "Please provide a detailed summary of the following YouTube video transcript:".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_transcript_path() -> PathBuf {
    PathBuf::from("transcript.srt")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub downloader: DownloaderConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Path to the subtitle downloader binary (e.g., yt-dlp)
    #[serde(default = "default_downloader_binary")]
    pub binary_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Path to the model runner binary (e.g., ollama)
    #[serde(default = "default_runner_binary")]
    pub binary_path: String,
    /// Model identifier passed to the runner
    #[serde(default = "default_model")]
    pub model: String,
    /// Instruction text prepended to the transcript
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Upper bound on the service liveness probe, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Where the downloaded subtitles land and the cleaned transcript lives
    #[serde(default = "default_transcript_path")]
    pub path: PathBuf,
    /// Remove the transcript file once the summary has been printed
    #[serde(default)]
    pub delete_after_summary: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            binary_path: default_downloader_binary(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            binary_path: default_runner_binary(),
            model: default_model(),
            prompt: default_prompt(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            path: default_transcript_path(),
            delete_after_summary: false,
        }
    }
}

impl RunnerConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| YtsumError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| YtsumError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| YtsumError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.downloader.binary_path.trim().is_empty() {
            return Err(YtsumError::Config(
                "downloader.binary_path must not be empty".to_string(),
            ));
        }
        if self.runner.binary_path.trim().is_empty() {
            return Err(YtsumError::Config(
                "runner.binary_path must not be empty".to_string(),
            ));
        }
        if self.runner.model.trim().is_empty() {
            return Err(YtsumError::Config(
                "runner.model must not be empty".to_string(),
            ));
        }
        if self.runner.prompt.trim().is_empty() {
            return Err(YtsumError::Config(
                "runner.prompt must not be empty".to_string(),
            ));
        }
        if self.transcript.path.as_os_str().is_empty() {
            return Err(YtsumError::Config(
                "transcript.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
