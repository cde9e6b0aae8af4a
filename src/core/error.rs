//! Error taxonomy for pipeline steps

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a step body, probe, or collaborator
///
/// Every variant is non-recoverable at the engine level: the runner aborts
/// the remaining pipeline and hands the error to the reporter, which owns
/// user-visible presentation and the process exit status.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The operator declined a confirmation prompt (expected termination)
    #[error("aborted by operator")]
    UserAborted,

    /// An invoked tool exited non-zero
    #[error("`{command}` exited with code {exit_code}: {stderr}")]
    ExternalProcess {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// An invoked tool could not be spawned at all
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Refused to clobber an existing file (overwrite not requested)
    #[error("file already exists: {}", .path.display())]
    FileExists { path: PathBuf },

    /// A file that must be patched does not exist
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Read or write failure on a file the pipeline mutates
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read operator input from the terminal
    #[error("failed to read operator input: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },

    /// A line of tool output that should be JSON was not
    #[error("malformed JSON from `{command}`: {source}")]
    MalformedJson {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskError {
    /// Exit code the process should terminate with when this error ends a run
    ///
    /// External tools propagate their own exit code; everything else,
    /// including an operator abort, maps to the generic 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::ExternalProcess { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }

    /// Whether this is an expected operator abort rather than a failure
    pub fn is_user_abort(&self) -> bool {
        matches!(self, TaskError::UserAborted)
    }
}
