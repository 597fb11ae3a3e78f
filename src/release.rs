//! End-of-run resource release. Everything here is best-effort: the
//! summary has already been delivered, so failures only warn.

use std::sync::Arc;

use tokio::fs;
use tracing::{info, warn};

use crate::config::{RunnerConfig, TranscriptConfig};
use crate::tool::{ToolInvocation, ToolRunner};

pub struct Releaser {
    runner_config: RunnerConfig,
    transcript_config: TranscriptConfig,
    runner: Arc<dyn ToolRunner>,
}

impl Releaser {
    pub fn new(
        runner_config: RunnerConfig,
        transcript_config: TranscriptConfig,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            runner_config,
            transcript_config,
            runner,
        }
    }

    /// Unload the model, then delete the transcript file if configured.
    pub async fn release(&self) {
        info!("Stopping model {}", self.runner_config.model);

        let invocation = ToolInvocation::new(&self.runner_config.binary_path)
            .arg("stop")
            .arg(&self.runner_config.model);
        match self.runner.run(invocation).await {
            Ok(_) => info!("Model {} stopped", self.runner_config.model),
            Err(e) => warn!("Could not stop model {}: {}", self.runner_config.model, e),
        }

        if self.transcript_config.delete_after_summary {
            match fs::remove_file(&self.transcript_config.path).await {
                Ok(()) => info!(
                    "Removed transcript file {}",
                    self.transcript_config.path.display()
                ),
                Err(e) => warn!(
                    "Could not remove transcript file {}: {}",
                    self.transcript_config.path.display(),
                    e
                ),
            }
        }
    }
}
