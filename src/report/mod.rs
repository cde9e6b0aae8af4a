//! Terminal outcome reporting

pub mod telemetry;

pub use telemetry::{NoopTelemetry, TelemetrySink, TracingTelemetry};

use crate::cli::output::{format_outcome, style, CROSS, INFO};
use crate::core::{PipelineResult, TerminalStatus};
use std::sync::Arc;
use tracing::debug;

/// Consumes a run's terminal outcome and renders it for the operator
///
/// Owns the exit-code decision: success maps to 0, an aborted run maps to
/// the triggering error's code. The telemetry sink is injected at
/// construction so nothing here touches process-wide state.
pub struct ResultReporter {
    telemetry: Arc<dyn TelemetrySink>,
}

impl ResultReporter {
    pub fn new(telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { telemetry }
    }

    /// Report the run and return the process exit code
    pub async fn report(&self, invocation: &[String], result: &PipelineResult) -> i32 {
        match &result.status {
            TerminalStatus::AllSucceeded => {
                self.print_success(result);
                0
            }
            TerminalStatus::AbortedAt { error, .. } => {
                // Best-effort: a telemetry failure must never mask the
                // pipeline error.
                if let Err(e) = self
                    .telemetry
                    .record_failure(invocation, &error.to_string())
                    .await
                {
                    debug!("Telemetry delivery failed: {:#}", e);
                }

                eprintln!("{} {}", CROSS, style(error).red());
                error.exit_code()
            }
        }
    }

    fn print_success(&self, result: &PipelineResult) {
        println!();
        for outcome in &result.outcomes {
            println!("{}", format_outcome(outcome));
        }

        println!();
        println!(
            "{} {} is ready for containers",
            INFO,
            style(&result.pipeline).bold()
        );
        println!();
        println!("A Dockerfile and two compose files now live in your project root:");
        println!("  docker compose -f docker-compose.dev.yml up    starts the local dev stack");
        println!("  docker compose -f docker-compose.prod.yml up   runs the production images");
        println!();
        println!("Docs: https://drydock.dev/docs/docker");
    }
}
