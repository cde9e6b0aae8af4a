//! Step domain model

use crate::core::{TaskContext, TaskError};
use async_trait::async_trait;

/// The work behind a single named step
///
/// Implementations are evaluated in a fixed order on each run: the skip
/// predicate first, then the idempotence probe, then the body. The first
/// of the three to produce a decision wins.
#[async_trait]
pub trait StepAction: Send + Sync {
    /// Skip predicate, evaluated before anything else
    ///
    /// Returning `Some(reason)` converts the step into a skip without
    /// touching the probe or the body.
    fn should_skip(&self, _ctx: &TaskContext) -> Option<String> {
        None
    }

    /// Optional probe detecting that the step's effect already holds
    ///
    /// Returning `Ok(Some(reason))` converts execution into a skip. A
    /// probe error is a step failure and aborts the pipeline.
    async fn already_satisfied(&self, _ctx: &TaskContext) -> Result<Option<String>, TaskError> {
        Ok(None)
    }

    /// Execute the step body
    ///
    /// The returned string is the step's output, recorded into the context
    /// by the runner. Any error aborts the remaining pipeline.
    async fn run(&self, ctx: &mut TaskContext) -> Result<String, TaskError>;
}

/// A single named unit of work in a pipeline
///
/// Created at pipeline-definition time and immutable thereafter.
pub struct Step {
    name: String,
    action: Box<dyn StepAction>,
}

impl Step {
    /// Create a step from a name and its action
    pub fn new(name: impl Into<String>, action: impl StepAction + 'static) -> Self {
        Self {
            name: name.into(),
            action: Box::new(action),
        }
    }

    /// The step's name, unique within its pipeline
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The work behind the step
    pub(crate) fn action(&self) -> &dyn StepAction {
        self.action.as_ref()
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}
