use std::path::Path;
use std::sync::Arc;

use tokio::fs;
use tracing::info;

use crate::config::RunnerConfig;
use crate::error::{Result, YtsumError};
use crate::tool::{ToolInvocation, ToolRunner};

/// Sends the cleaned transcript to the model runner and collects the
/// summary it writes back.
pub struct Summarizer {
    config: RunnerConfig,
    runner: Arc<dyn ToolRunner>,
}

impl Summarizer {
    pub fn new(config: RunnerConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self { config, runner }
    }

    /// Summarize the transcript at `path` in one shot.
    ///
    /// The instruction text travels as a command-line argument, the
    /// transcript as the child's standard input. No timeout applies;
    /// the call blocks until the model finishes generating.
    pub async fn summarize(&self, path: &Path) -> Result<String> {
        let transcript = fs::read_to_string(path).await?;
        if transcript.trim().is_empty() {
            return Err(YtsumError::NothingToSummarize);
        }

        info!(
            "Sending transcript ({} bytes) to {} via stdin",
            transcript.len(),
            self.config.binary_path
        );

        let invocation = ToolInvocation::new(&self.config.binary_path)
            .arg("run")
            .arg(&self.config.model)
            .arg(&self.config.prompt)
            .stdin(transcript);
        let output = self.runner.run(invocation).await?;

        Ok(output.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tool::{MockToolRunner, ToolOutput};

    fn write_transcript(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("transcript.srt");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_sends_prompt_as_argument_and_transcript_on_stdin() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_transcript(&temp, "Hello world\nGoodbye\n");

        let config = RunnerConfig::default();
        let expected_args = vec![
            "run".to_string(),
            config.model.clone(),
            config.prompt.clone(),
        ];

        let mut mock = MockToolRunner::new();
        mock.expect_run()
            .withf(move |invocation| {
                invocation.program == "ollama"
                    && invocation.args == expected_args
                    && invocation.stdin.as_deref() == Some("Hello world\nGoodbye\n")
                    && invocation.timeout.is_none()
            })
            .times(1)
            .returning(|_| {
                Ok(ToolOutput {
                    stdout: "  A video about greetings.\n".to_string(),
                    stderr: String::new(),
                })
            });

        let summary = Summarizer::new(config, Arc::new(mock))
            .summarize(&path)
            .await
            .unwrap();

        assert_eq!(summary, "A video about greetings.");
    }

    #[tokio::test]
    async fn test_blank_transcript_is_rejected_without_running_the_model() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_transcript(&temp, "  \n\n\t\n");

        // No expectations: calling the runner would panic the test.
        let mock = MockToolRunner::new();
        let result = Summarizer::new(RunnerConfig::default(), Arc::new(mock))
            .summarize(&path)
            .await;

        assert!(matches!(result, Err(YtsumError::NothingToSummarize)));
    }

    #[tokio::test]
    async fn test_missing_transcript_is_an_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gone.srt");

        let mock = MockToolRunner::new();
        let result = Summarizer::new(RunnerConfig::default(), Arc::new(mock))
            .summarize(&path)
            .await;

        assert!(matches!(result, Err(YtsumError::Io(_))));
    }

    #[tokio::test]
    async fn test_model_failure_carries_its_diagnostics() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_transcript(&temp, "some text\n");

        let mut mock = MockToolRunner::new();
        mock.expect_run().times(1).returning(|invocation| {
            Err(YtsumError::CommandFailed {
                command: invocation.command_line(),
                code: Some(1),
                stdout: "partial generation".to_string(),
                stderr: "model not found".to_string(),
            })
        });

        let result = Summarizer::new(RunnerConfig::default(), Arc::new(mock))
            .summarize(&path)
            .await;

        match result {
            Err(error @ YtsumError::CommandFailed { .. }) => {
                let message = error.to_string();
                assert!(message.contains("model not found"));
                assert!(message.contains("partial generation"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}
