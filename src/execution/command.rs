//! External command execution

use crate::core::TaskError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

/// Trait for running external commands - allows for mock implementations
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command in the given working directory and capture its stdout
    ///
    /// Stdout is returned verbatim; callers trim by convention. A non-zero
    /// exit maps to `TaskError::ExternalProcess` carrying the exit code
    /// and captured stderr.
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String, TaskError>;
}

/// Runs commands as real subprocesses
///
/// No environment is configured beyond the working directory; the child
/// inherits the parent's.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

/// Render a program + args as one display line for logs and errors
pub(crate) fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[async_trait]
impl CommandExecutor for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String, TaskError> {
        let command = command_line(program, args);
        debug!("Spawning `{}` in {}", command, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TaskError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code().unwrap_or(-1);
            warn!("`{}` exited with code {}: {}", command, exit_code, stderr);
            return Err(TaskError::ExternalProcess {
                command,
                exit_code,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("`{}` returned {} bytes of output", command, stdout.len());

        Ok(stdout)
    }
}
