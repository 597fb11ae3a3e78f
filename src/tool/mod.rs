// External tool execution seam
//
// Every subprocess this crate touches goes through one trait:
// - Invocation: builder describing a single tool run
// - Process: tokio-backed implementation used outside of tests

pub mod invocation;
pub mod process;

use std::path::PathBuf;

use async_trait::async_trait;

pub use invocation::*;
pub use process::*;

use crate::error::Result;

/// Capability to locate and run external command-line tools.
///
/// `run` resolves to `Ok` only when the tool exits with status zero.
/// Any other outcome, including a missing binary or an expired
/// timeout, comes back as an error carrying whatever the tool wrote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Locate `program` on the executable search path.
    fn locate(&self, program: &str) -> Result<PathBuf>;

    /// Run the tool to completion, capturing stdout and stderr.
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput>;
}
