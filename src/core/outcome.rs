//! Outcome models for one pipeline run

use crate::core::TaskError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What happened to a single step
#[derive(Debug)]
pub enum OutcomeKind {
    /// Step body ran to completion
    Succeeded { output: String },
    /// Step was skipped (predicate or idempotence probe)
    Skipped { reason: String },
    /// Step body or probe failed, aborting the pipeline
    Failed { error: String },
}

/// Terminal record for one step, created once per run and never mutated
#[derive(Debug)]
pub struct StepOutcome {
    /// Name of the step this outcome belongs to
    pub step: String,

    /// What happened
    pub kind: OutcomeKind,

    /// When the step was picked up by the runner
    pub started_at: DateTime<Utc>,

    /// When the outcome was decided
    pub finished_at: DateTime<Utc>,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Succeeded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.kind, OutcomeKind::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.kind, OutcomeKind::Failed { .. })
    }
}

/// How a run ended
#[derive(Debug)]
pub enum TerminalStatus {
    /// Every step succeeded or was skipped
    AllSucceeded,
    /// A step failed; nothing after it was executed
    AbortedAt { step: String, error: TaskError },
}

/// Result of one pipeline run
///
/// The outcome sequence is a prefix of the pipeline's step list: it covers
/// every step up to and including the first failure, and never extends
/// past one.
#[derive(Debug)]
pub struct PipelineResult {
    /// Unique id for this run
    pub run_id: Uuid,

    /// Name of the pipeline that ran
    pub pipeline: String,

    /// One outcome per executed-or-skipped step, in declaration order
    pub outcomes: Vec<StepOutcome>,

    /// Terminal status of the run
    pub status: TerminalStatus,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run ended
    pub finished_at: DateTime<Utc>,
}

impl PipelineResult {
    /// Whether the whole pipeline succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.status, TerminalStatus::AllSucceeded)
    }

    /// Look up the outcome of a step by name
    pub fn outcome(&self, step: &str) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|o| o.step == step)
    }

    /// The failing step and its error, if the run aborted
    pub fn failure(&self) -> Option<(&str, &TaskError)> {
        match &self.status {
            TerminalStatus::AllSucceeded => None,
            TerminalStatus::AbortedAt { step, error } => Some((step.as_str(), error)),
        }
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        match &self.status {
            TerminalStatus::AllSucceeded => 0,
            TerminalStatus::AbortedAt { error, .. } => error.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(step: &str, kind: OutcomeKind) -> StepOutcome {
        let now = Utc::now();
        StepOutcome {
            step: step.to_string(),
            kind,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_successful_result_exit_code() {
        let now = Utc::now();
        let result = PipelineResult {
            run_id: Uuid::new_v4(),
            pipeline: "setup".to_string(),
            outcomes: vec![outcome(
                "a",
                OutcomeKind::Succeeded {
                    output: String::new(),
                },
            )],
            status: TerminalStatus::AllSucceeded,
            started_at: now,
            finished_at: now,
        };

        assert!(result.is_success());
        assert_eq!(result.exit_code(), 0);
        assert!(result.failure().is_none());
    }

    #[test]
    fn test_aborted_result_carries_error_exit_code() {
        let now = Utc::now();
        let result = PipelineResult {
            run_id: Uuid::new_v4(),
            pipeline: "setup".to_string(),
            outcomes: vec![outcome(
                "a",
                OutcomeKind::Failed {
                    error: "boom".to_string(),
                },
            )],
            status: TerminalStatus::AbortedAt {
                step: "a".to_string(),
                error: TaskError::ExternalProcess {
                    command: "yarn".to_string(),
                    exit_code: 2,
                    stderr: "boom".to_string(),
                },
            },
            started_at: now,
            finished_at: now,
        };

        assert!(!result.is_success());
        assert_eq!(result.exit_code(), 2);
        let (step, error) = result.failure().unwrap();
        assert_eq!(step, "a");
        assert!(!error.is_user_abort());
    }

    #[test]
    fn test_outcome_lookup_by_name() {
        let now = Utc::now();
        let result = PipelineResult {
            run_id: Uuid::new_v4(),
            pipeline: "setup".to_string(),
            outcomes: vec![
                outcome(
                    "a",
                    OutcomeKind::Skipped {
                        reason: "already done".to_string(),
                    },
                ),
                outcome(
                    "b",
                    OutcomeKind::Succeeded {
                        output: "ok".to_string(),
                    },
                ),
            ],
            status: TerminalStatus::AllSucceeded,
            started_at: now,
            finished_at: now,
        };

        assert!(result.outcome("a").unwrap().is_skipped());
        assert!(result.outcome("b").unwrap().is_success());
        assert!(result.outcome("c").is_none());
    }
}
