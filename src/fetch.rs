use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::DownloaderConfig;
use crate::error::{Result, YtsumError};
use crate::tool::{ToolInvocation, ToolRunner};

/// Subtitle language requested from the downloader.
const SUBTITLE_LANGUAGE: &str = "en";

/// Downloads a video's subtitle track to the transcript path.
pub struct SubtitleFetcher {
    config: DownloaderConfig,
    transcript_path: PathBuf,
    runner: Arc<dyn ToolRunner>,
}

impl SubtitleFetcher {
    pub fn new(
        config: DownloaderConfig,
        transcript_path: PathBuf,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            config,
            transcript_path,
            runner,
        }
    }

    /// Download English subtitles for `url`, preferring manual subtitles
    /// but accepting auto-generated ones, converted to SRT.
    ///
    /// Fails when the downloader exits non-zero, when no subtitle file
    /// appears afterwards, or when the file comes back empty. An empty
    /// artifact is removed before the failure is reported so a later
    /// run starts clean.
    pub async fn fetch(&self, url: &str) -> Result<PathBuf> {
        info!("Downloading subtitles for {}", url);

        let invocation = ToolInvocation::new(&self.config.binary_path)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .args(["--sub-lang", SUBTITLE_LANGUAGE])
            .args(["--sub-format", "ttml"])
            .args(["--convert-subs", "srt"])
            .arg("--output")
            .arg(self.transcript_path.to_string_lossy())
            .arg(url);
        self.runner.run(invocation).await?;

        // The downloader may append the language and extension to the
        // requested output name; fold that variant back onto the
        // configured path.
        if let Some(alternate) = self.alternate_output_path() {
            if alternate.exists() {
                debug!(
                    "Renaming {} to {}",
                    alternate.display(),
                    self.transcript_path.display()
                );
                fs::rename(&alternate, &self.transcript_path).await?;
            }
        }

        let metadata = match fs::metadata(&self.transcript_path).await {
            Ok(metadata) => metadata,
            Err(_) => return Err(YtsumError::SubtitlesNotCreated(self.transcript_path.clone())),
        };

        if metadata.len() == 0 {
            if let Err(e) = fs::remove_file(&self.transcript_path).await {
                warn!(
                    "Could not remove empty subtitle file {}: {}",
                    self.transcript_path.display(),
                    e
                );
            }
            return Err(YtsumError::SubtitlesEmpty(self.transcript_path.clone()));
        }

        info!(
            "Subtitles saved to {} ({} bytes)",
            self.transcript_path.display(),
            metadata.len()
        );
        Ok(self.transcript_path.clone())
    }

    /// `transcript.srt` requested as the output name can come back from
    /// the downloader as `transcript.srt.en.srt`.
    fn alternate_output_path(&self) -> Option<PathBuf> {
        let name = self.transcript_path.file_name()?.to_str()?;
        Some(
            self.transcript_path
                .with_file_name(format!("{name}.{SUBTITLE_LANGUAGE}.srt")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use crate::tool::{MockToolRunner, ToolOutput};

    const URL: &str = "https://example.com/watch?v=abc123";
    const BODY: &str = "1\n00:00:00,000 --> 00:00:01,000\nhi there\n";

    fn fetcher(mock: MockToolRunner, path: &Path) -> SubtitleFetcher {
        SubtitleFetcher::new(
            DownloaderConfig::default(),
            path.to_path_buf(),
            Arc::new(mock),
        )
    }

    #[tokio::test]
    async fn test_passes_the_expected_downloader_arguments() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("transcript.srt");

        let mut mock = MockToolRunner::new();
        let target = path.clone();
        mock.expect_run()
            .withf(move |invocation| {
                invocation.args.contains(&"--skip-download".to_string())
                    && invocation.args.contains(&"--write-auto-subs".to_string())
                    && invocation.args.contains(&"en".to_string())
                    && invocation.args.contains(&target.to_string_lossy().to_string())
                    && invocation.args.last() == Some(&URL.to_string())
                    && invocation.stdin.is_none()
            })
            .times(1)
            .returning({
                let target = path.clone();
                move |_| {
                    std::fs::write(&target, BODY).unwrap();
                    Ok(ToolOutput::default())
                }
            });

        let fetched = fetcher(mock, &path).fetch(URL).await.unwrap();
        assert_eq!(fetched, path);
    }

    #[tokio::test]
    async fn test_renames_the_language_suffixed_variant() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("transcript.srt");
        let suffixed = temp.path().join("transcript.srt.en.srt");

        let mut mock = MockToolRunner::new();
        mock.expect_run().times(1).returning({
            let suffixed = suffixed.clone();
            move |_| {
                std::fs::write(&suffixed, BODY).unwrap();
                Ok(ToolOutput::default())
            }
        });

        let fetched = fetcher(mock, &path).fetch(URL).await.unwrap();
        assert_eq!(fetched, path);
        assert!(path.exists());
        assert!(!suffixed.exists());
    }

    #[tokio::test]
    async fn test_missing_output_file_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("transcript.srt");

        let mut mock = MockToolRunner::new();
        mock.expect_run()
            .times(1)
            .returning(|_| Ok(ToolOutput::default()));

        let result = fetcher(mock, &path).fetch(URL).await;
        assert!(matches!(result, Err(YtsumError::SubtitlesNotCreated(_))));
    }

    #[tokio::test]
    async fn test_empty_output_file_is_removed_and_reported() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("transcript.srt");

        let mut mock = MockToolRunner::new();
        mock.expect_run().times(1).returning({
            let target = path.clone();
            move |_| {
                std::fs::write(&target, "").unwrap();
                Ok(ToolOutput::default())
            }
        });

        let result = fetcher(mock, &path).fetch(URL).await;
        assert!(matches!(result, Err(YtsumError::SubtitlesEmpty(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_downloader_failure_propagates() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("transcript.srt");

        let mut mock = MockToolRunner::new();
        mock.expect_run().times(1).returning(|invocation| {
            Err(YtsumError::CommandFailed {
                command: invocation.command_line(),
                code: Some(1),
                stdout: String::new(),
                stderr: "ERROR: Video unavailable".to_string(),
            })
        });

        let result = fetcher(mock, &path).fetch(URL).await;
        match result {
            Err(YtsumError::CommandFailed { stderr, .. }) => {
                assert!(stderr.contains("Video unavailable"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}
