//! Start-of-run checks: required tools on PATH, runner service liveness.

use tracing::{debug, info, warn};

use crate::config::{Config, RunnerConfig};
use crate::error::Result;
use crate::tool::{ToolInvocation, ToolRunner};

/// Verify that every required external tool can be found.
///
/// Runs before anything touches the network so a missing binary
/// fails fast with a message naming the tool.
pub fn check_tools(runner: &dyn ToolRunner, config: &Config) -> Result<()> {
    for tool in [&config.downloader.binary_path, &config.runner.binary_path] {
        let path = runner.locate(tool)?;
        debug!("Found {} at {}", tool, path.display());
    }
    Ok(())
}

/// Ask the model runner service for its loaded models.
///
/// Purely informational: a dead or slow service logs a warning and the
/// run proceeds, since `run` starts the service on demand anyway.
pub async fn probe_runner_service(runner: &dyn ToolRunner, config: &RunnerConfig) {
    let invocation = ToolInvocation::new(&config.binary_path)
        .arg("ps")
        .timeout(config.probe_timeout());

    match runner.run(invocation).await {
        Ok(_) => info!("{} service is responding", config.binary_path),
        Err(e) => warn!(
            "Could not confirm the {} service is running, proceeding anyway: {}",
            config.binary_path, e
        ),
    }
}
