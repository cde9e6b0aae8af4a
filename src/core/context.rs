//! Task context - shared state across one pipeline run

use std::collections::HashMap;

/// Mutable state shared by every step within a single run
///
/// The runner owns the context and lends it to each step body in turn;
/// no step can retain it past the run. Step outputs are recorded here by
/// the runner so later steps can consult what earlier ones produced.
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    /// Arbitrary key/value state written by step bodies
    values: HashMap<String, String>,

    /// Outputs of completed steps (step name -> output)
    outputs: HashMap<String, String>,
}

impl TaskContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Record the output of a completed step
    pub fn record_output(&mut self, step: &str, output: impl Into<String>) {
        self.outputs.insert(step.to_string(), output.into());
    }

    /// Get the output of a completed step
    pub fn output_of(&self, step: &str) -> Option<&str> {
        self.outputs.get(step).map(String::as_str)
    }
}
