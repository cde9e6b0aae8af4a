//! CLI output formatting

use crate::core::{OutcomeKind, StepOutcome};
use crate::execution::PipelineEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar tracking pipeline steps
pub fn step_progress(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a pipeline event for display
pub fn format_event(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::PipelineStarted {
            run_id, pipeline, ..
        } => format!(
            "{} Starting {} ({})",
            ROCKET,
            style(pipeline).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        PipelineEvent::StepStarted { step, index, total } => format!(
            "{} [{}/{}] {}",
            SPINNER,
            index + 1,
            total,
            style(step).cyan()
        ),
        PipelineEvent::StepSkipped { step, reason } => {
            format!("{} {} ({})", SKIP, style(step).dim(), style(reason).dim())
        }
        PipelineEvent::StepSucceeded { step } => format!("{} {}", CHECK, style(step).green()),
        PipelineEvent::StepFailed { step, error } => {
            format!("{} {}: {}", CROSS, style(step).red(), style(error).dim())
        }
        PipelineEvent::PipelineCompleted { succeeded, .. } => {
            if *succeeded {
                format!("{} All steps {}", CHECK, style("completed").green())
            } else {
                format!("{} Setup {}", CROSS, style("aborted").red())
            }
        }
    }
}

/// Format a terminal step outcome for the post-run summary
pub fn format_outcome(outcome: &StepOutcome) -> String {
    match &outcome.kind {
        OutcomeKind::Succeeded { .. } => format!("{} {}", CHECK, style(&outcome.step).green()),
        OutcomeKind::Skipped { reason } => format!(
            "{} {} ({})",
            SKIP,
            style(&outcome.step).dim(),
            style(reason).dim()
        ),
        OutcomeKind::Failed { error } => format!(
            "{} {}: {}",
            CROSS,
            style(&outcome.step).red(),
            style(error).dim()
        ),
    }
}
