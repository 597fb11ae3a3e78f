use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum YtsumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Required command '{0}' not found on PATH. Install it and re-run.")]
    MissingTool(String),

    #[error(
        "Command `{command}` failed with {}.\n--- stderr ---\n{stderr}\n--- stdout ---\n{stdout}",
        describe_exit(.code)
    )]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Command `{command}` did not finish within {timeout:?}")]
    CommandTimedOut { command: String, timeout: Duration },

    #[error(
        "Subtitle file '{}' was not created. The video may have no English subtitles, or the download failed.",
        .0.display()
    )]
    SubtitlesNotCreated(PathBuf),

    #[error(
        "Subtitle file '{}' is empty. The video most likely has no English subtitles.",
        .0.display()
    )]
    SubtitlesEmpty(PathBuf),

    #[error("Transcript contains no text after cleaning")]
    EmptyTranscript,

    #[error("Transcript is blank, nothing to summarize")]
    NothingToSummarize,

    #[error("No video URL provided")]
    MissingUrl,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (killed by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, YtsumError>;
