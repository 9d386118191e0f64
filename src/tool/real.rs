//! Real external tool invoker over `tokio::process`.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, trace};

use super::Tool;
use crate::error::{DctlError, Result};

/// The real display management binary, invoked one command at a time.
///
/// Timeout and cancellation are delegated to the process execution
/// primitive; this layer imposes none of its own.
pub struct CliTool {
    program: PathBuf,
}

impl CliTool {
    /// Wrap a located binary path.
    pub const fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// The binary this invoker runs.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Tool for CliTool {
    async fn invoke(&self, args: &[String]) -> Result<String> {
        debug!(program = %self.program.display(), ?args, "Invoking external tool");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| DctlError::Spawn {
                program: self.program.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(DctlError::CommandFailed {
                program: self.program.display().to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!(bytes = stdout.len(), "External tool succeeded");
        Ok(stdout)
    }
}
