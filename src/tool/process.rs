use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, YtsumError};
use crate::tool::{ToolInvocation, ToolOutput, ToolRunner};

/// Tool runner backed by real child processes.
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    fn locate(&self, program: &str) -> Result<PathBuf> {
        which::which(program).map_err(|_| YtsumError::MissingTool(program.to_string()))
    }

    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput> {
        debug!("Executing: {}", invocation.command_line());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                YtsumError::MissingTool(invocation.program.clone())
            } else {
                YtsumError::Io(e)
            }
        })?;

        // Feed stdin while draining the output pipes. Writing first and
        // reading afterwards can deadlock once a pipe buffer fills up.
        let stdin_pipe = child.stdin.take();
        let payload = invocation.stdin.clone();
        let feed = async move {
            if let (Some(mut pipe), Some(data)) = (stdin_pipe, payload) {
                match pipe.write_all(data.as_bytes()).await {
                    Ok(()) => {
                        let _ = pipe.shutdown().await;
                    }
                    // A tool that exits without draining stdin reports
                    // through its exit status, not through this pipe.
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    Err(e) => return Err(e),
                }
            }
            Ok(())
        };

        let wait = async {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            fed?;
            output
        };

        let output = match invocation.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(YtsumError::CommandTimedOut {
                        command: invocation.command_line(),
                        timeout: limit,
                    });
                }
            },
            None => wait.await?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(YtsumError::CommandFailed {
                command: invocation.command_line(),
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}
