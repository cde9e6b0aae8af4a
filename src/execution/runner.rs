//! Pipeline runner - orchestrates one sequential run

use crate::core::{
    OutcomeKind, Pipeline, PipelineResult, StepOutcome, TaskContext, TaskError, TerminalStatus,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Events emitted during a pipeline run
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    PipelineStarted {
        run_id: Uuid,
        pipeline: String,
        total_steps: usize,
    },
    StepStarted {
        step: String,
        index: usize,
        total: usize,
    },
    StepSkipped {
        step: String,
        reason: String,
    },
    StepSucceeded {
        step: String,
    },
    StepFailed {
        step: String,
        error: String,
    },
    PipelineCompleted {
        run_id: Uuid,
        succeeded: bool,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(PipelineEvent) + Send + Sync>;

/// Executes a pipeline's steps strictly in declaration order
///
/// Later steps depend on side effects of earlier ones, so there is no
/// parallelism: the runner awaits each step before starting the next and
/// stops at the first failure. Progress is surfaced through injected
/// event handlers rather than any process-wide output state.
#[derive(Default)]
pub struct PipelineRunner {
    event_handlers: Vec<EventHandler>,
}

impl PipelineRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(PipelineEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit(&self, event: PipelineEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the pipeline against the given context
    ///
    /// Returns one outcome per executed-or-skipped step. On the first step
    /// failure the remaining steps are never evaluated and the result's
    /// status is `AbortedAt`; the failed step's outcome is the last entry.
    pub async fn run(&self, pipeline: &Pipeline, ctx: &mut TaskContext) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let run_started_at = Utc::now();
        let total = pipeline.len();

        info!("Starting pipeline run: {} ({})", pipeline.name(), run_id);
        self.emit(PipelineEvent::PipelineStarted {
            run_id,
            pipeline: pipeline.name().to_string(),
            total_steps: total,
        });

        let mut outcomes = Vec::with_capacity(total);

        for (index, step) in pipeline.steps().iter().enumerate() {
            let started_at = Utc::now();
            self.emit(PipelineEvent::StepStarted {
                step: step.name().to_string(),
                index,
                total,
            });

            if let Some(reason) = step.action().should_skip(ctx) {
                debug!("Step {} skipped: {}", step.name(), reason);
                self.emit(PipelineEvent::StepSkipped {
                    step: step.name().to_string(),
                    reason: reason.clone(),
                });
                outcomes.push(StepOutcome {
                    step: step.name().to_string(),
                    kind: OutcomeKind::Skipped { reason },
                    started_at,
                    finished_at: Utc::now(),
                });
                continue;
            }

            match step.action().already_satisfied(ctx).await {
                Ok(Some(reason)) => {
                    debug!("Step {} already satisfied: {}", step.name(), reason);
                    self.emit(PipelineEvent::StepSkipped {
                        step: step.name().to_string(),
                        reason: reason.clone(),
                    });
                    outcomes.push(StepOutcome {
                        step: step.name().to_string(),
                        kind: OutcomeKind::Skipped { reason },
                        started_at,
                        finished_at: Utc::now(),
                    });
                    continue;
                }
                Ok(None) => {}
                Err(err) => {
                    return self.abort(run_id, pipeline, outcomes, step.name(), started_at, run_started_at, err);
                }
            }

            match step.action().run(ctx).await {
                Ok(output) => {
                    info!("Step {} succeeded", step.name());
                    ctx.record_output(step.name(), output.clone());
                    self.emit(PipelineEvent::StepSucceeded {
                        step: step.name().to_string(),
                    });
                    outcomes.push(StepOutcome {
                        step: step.name().to_string(),
                        kind: OutcomeKind::Succeeded { output },
                        started_at,
                        finished_at: Utc::now(),
                    });
                }
                Err(err) => {
                    return self.abort(run_id, pipeline, outcomes, step.name(), started_at, run_started_at, err);
                }
            }
        }

        info!("Pipeline run finished: {} - all steps succeeded", pipeline.name());
        self.emit(PipelineEvent::PipelineCompleted {
            run_id,
            succeeded: true,
        });

        PipelineResult {
            run_id,
            pipeline: pipeline.name().to_string(),
            outcomes,
            status: TerminalStatus::AllSucceeded,
            started_at: run_started_at,
            finished_at: Utc::now(),
        }
    }

    /// Record a step failure and close out the run
    #[allow(clippy::too_many_arguments)]
    fn abort(
        &self,
        run_id: Uuid,
        pipeline: &Pipeline,
        mut outcomes: Vec<StepOutcome>,
        step: &str,
        started_at: chrono::DateTime<Utc>,
        run_started_at: chrono::DateTime<Utc>,
        err: TaskError,
    ) -> PipelineResult {
        if err.is_user_abort() {
            info!("Pipeline run aborted by operator at step {}", step);
        } else {
            error!("Step {} failed: {}", step, err);
        }

        self.emit(PipelineEvent::StepFailed {
            step: step.to_string(),
            error: err.to_string(),
        });
        outcomes.push(StepOutcome {
            step: step.to_string(),
            kind: OutcomeKind::Failed {
                error: err.to_string(),
            },
            started_at,
            finished_at: Utc::now(),
        });

        self.emit(PipelineEvent::PipelineCompleted {
            run_id,
            succeeded: false,
        });

        PipelineResult {
            run_id,
            pipeline: pipeline.name().to_string(),
            outcomes,
            status: TerminalStatus::AbortedAt {
                step: step.to_string(),
                error: err,
            },
            started_at: run_started_at,
            finished_at: Utc::now(),
        }
    }
}
