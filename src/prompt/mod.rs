//! Operator confirmation prompts

use crate::core::TaskError;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Trait for yes/no confirmation - allows for scripted implementations
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// Ask the operator to confirm; `Ok(false)` means they declined
    async fn confirm(&self, message: &str) -> Result<bool, TaskError>;
}

/// Prompts on stderr and reads one line from stdin
///
/// Anything other than `y`/`yes` (case-insensitive) counts as a refusal,
/// so an accidental Enter is the safe answer.
#[derive(Debug, Clone, Default)]
pub struct TerminalGate;

impl TerminalGate {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConfirmationGate for TerminalGate {
    async fn confirm(&self, message: &str) -> Result<bool, TaskError> {
        eprint!("{} [y/N] ", message);
        std::io::stderr().flush().ok();

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        reader
            .read_line(&mut line)
            .await
            .map_err(|source| TaskError::Prompt { source })?;

        let answer = line.trim().to_lowercase();
        debug!("Operator answered: {:?}", answer);

        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

/// Short-circuits every confirmation to `true` without prompting
///
/// Used in force and non-interactive modes, where blocking on a read
/// would hang the run.
#[derive(Debug, Clone, Default)]
pub struct AutoApprove;

#[async_trait]
impl ConfirmationGate for AutoApprove {
    async fn confirm(&self, _message: &str) -> Result<bool, TaskError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_approve_never_declines() {
        let gate = AutoApprove;
        assert!(gate.confirm("Continue?").await.unwrap());
    }
}
