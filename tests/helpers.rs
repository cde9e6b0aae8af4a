//! Test utility functions for drydock

use drydock::core::{OutcomeKind, PipelineResult, TaskError};
use drydock::execution::CommandExecutor;
use drydock::prompt::ConfirmationGate;
use drydock::report::TelemetrySink;

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted command executor keyed by the full command line
///
/// Responses are consumed in order per command line; an unscripted command
/// fails the test loudly. Every invocation is recorded for assertions.
#[derive(Default)]
pub struct MockExecutor {
    responses: Mutex<HashMap<String, VecDeque<Result<String, (i32, String)>>>>,
    calls: Mutex<Vec<String>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful invocation
    pub fn respond(self, command: &str, stdout: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(Ok(stdout.to_string()));
        self
    }

    /// Script a non-zero exit
    pub fn fail(self, command: &str, exit_code: i32, stderr: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(Err((exit_code, stderr.to_string())));
        self
    }

    /// Every command line this executor has run, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ran(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<String, TaskError> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line.clone());

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&line)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(Ok(stdout)) => Ok(stdout),
            Some(Err((exit_code, stderr))) => Err(TaskError::ExternalProcess {
                command: line,
                exit_code,
                stderr,
            }),
            None => panic!("MockExecutor: no response scripted for `{}`", line),
        }
    }
}

/// Confirmation gate answering from a fixed script
///
/// Panics when asked more questions than it has answers for, which makes
/// "the gate was never invoked" assertions trivial.
pub struct ScriptedGate {
    answers: Mutex<VecDeque<bool>>,
    invocations: AtomicUsize,
}

impl ScriptedGate {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            invocations: AtomicUsize::new(0),
        }
    }

    /// A gate that panics on any prompt
    pub fn untouchable() -> Self {
        Self::new(Vec::new())
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationGate for ScriptedGate {
    async fn confirm(&self, message: &str) -> Result<bool, TaskError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedGate: unexpected prompt: {}", message));
        Ok(answer)
    }
}

/// Telemetry sink that remembers every report
#[derive(Default)]
pub struct RecordingTelemetry {
    reports: Mutex<Vec<(Vec<String>, String)>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(Vec<String>, String)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelemetrySink for RecordingTelemetry {
    async fn record_failure(&self, invocation: &[String], message: &str) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap()
            .push((invocation.to_vec(), message.to_string()));
        Ok(())
    }
}

/// Create a temp project directory seeded with a drydock.toml
pub fn temp_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp project dir");
    std::fs::write(
        dir.path().join("drydock.toml"),
        "[web]\n  port = 8910\n\n[api]\n  port = 8911\n",
    )
    .expect("Failed to seed drydock.toml");
    dir
}

/// Assert a step succeeded
pub fn assert_step_succeeded(result: &PipelineResult, step: &str) {
    let outcome = result
        .outcome(step)
        .unwrap_or_else(|| panic!("Step '{}' has no outcome in {:?}", step, result.status));
    assert!(
        outcome.is_success(),
        "Step '{}' should have succeeded, got {:?}",
        step,
        outcome.kind
    );
}

/// Assert a step was skipped with a reason containing the given text
pub fn assert_step_skipped(result: &PipelineResult, step: &str, expected_reason: &str) {
    let outcome = result
        .outcome(step)
        .unwrap_or_else(|| panic!("Step '{}' has no outcome in {:?}", step, result.status));
    match &outcome.kind {
        OutcomeKind::Skipped { reason } => assert!(
            reason.contains(expected_reason),
            "Step '{}' skip reason:\n{}\n\ndoes not contain:\n{}",
            step,
            reason,
            expected_reason
        ),
        other => panic!("Step '{}' should have been skipped, got {:?}", step, other),
    }
}

/// Assert the run aborted at the given step
pub fn assert_aborted_at(result: &PipelineResult, step: &str) {
    let (failed_step, _) = result
        .failure()
        .unwrap_or_else(|| panic!("Run should have aborted, but it succeeded"));
    assert_eq!(
        failed_step, step,
        "Run should have aborted at '{}', aborted at '{}'",
        step, failed_step
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_executor_scripted_responses_in_order() {
        let exec = MockExecutor::new()
            .respond("yarn --version", "4.1.0\n")
            .fail("yarn --version", 1, "broken");

        let first = exec.run("yarn", &["--version"], Path::new(".")).await;
        assert_eq!(first.unwrap(), "4.1.0\n");

        let second = exec.run("yarn", &["--version"], Path::new(".")).await;
        assert!(matches!(second, Err(TaskError::ExternalProcess { .. })));

        assert_eq!(exec.calls().len(), 2);
        assert!(exec.ran("yarn --version"));
    }

    #[tokio::test]
    async fn test_scripted_gate_counts_invocations() {
        let gate = ScriptedGate::new(vec![true, false]);

        assert!(gate.confirm("first?").await.unwrap());
        assert!(!gate.confirm("second?").await.unwrap());
        assert_eq!(gate.invocations(), 2);
    }

    #[test]
    fn test_temp_project_seeds_config() {
        let dir = temp_project();
        let config = std::fs::read_to_string(dir.path().join("drydock.toml")).unwrap();
        assert!(config.contains("[web]"));
    }
}
