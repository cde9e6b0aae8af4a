//! Pipeline domain model

use crate::core::Step;

/// An ordered list of named steps executed under one shared context
///
/// Built at definition time via the `step` builder; immutable once handed
/// to a runner. Step names must be unique so outcomes can be reported by
/// name.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step, preserving declaration order
    pub fn step(mut self, step: Step) -> Self {
        debug_assert!(
            !self.steps.iter().any(|s| s.name() == step.name()),
            "duplicate step name: {}",
            step.name()
        );
        self.steps.push(step);
        self
    }

    /// The pipeline's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The steps in declaration order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
