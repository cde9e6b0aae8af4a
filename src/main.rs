use anyhow::{Context, Result};
use drydock::cli::commands::SetupCommand;
use drydock::cli::output::{format_event, step_progress, style, INFO};
use drydock::cli::{Cli, Command};
use drydock::execution::{CommandExecutor, PipelineEvent, PipelineRunner, ProcessRunner};
use drydock::prompt::{AutoApprove, ConfirmationGate, TerminalGate};
use drydock::report::{NoopTelemetry, ResultReporter, TelemetrySink, TracingTelemetry};
use drydock::setup::{build_pipeline, ProjectPaths, SetupOptions};
use drydock::TaskContext;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Setup(cmd) => {
            let code = run_setup(cmd).await;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

async fn run_setup(cmd: &SetupCommand) -> i32 {
    let paths = ProjectPaths::new(&cmd.project);

    println!(
        "{} Enabling the experimental Docker deployment in {}",
        INFO,
        style(paths.base().display()).bold()
    );

    // Wire up collaborators; everything the pipeline touches is injected
    let gate: Arc<dyn ConfirmationGate> = if cmd.force {
        Arc::new(AutoApprove)
    } else {
        Arc::new(TerminalGate::new())
    };
    let exec: Arc<dyn CommandExecutor> = Arc::new(ProcessRunner::new());
    let telemetry: Arc<dyn TelemetrySink> = if cmd.no_telemetry {
        Arc::new(NoopTelemetry)
    } else {
        Arc::new(TracingTelemetry)
    };

    let options = SetupOptions {
        force: cmd.force,
        overwrite: cmd.overwrite,
    };
    let pipeline = build_pipeline(&paths, options, gate, exec);

    // Render progress through the bar without fighting its redraws
    let progress = step_progress(pipeline.len());
    let bar = progress.clone();
    let mut runner = PipelineRunner::new();
    runner.add_event_handler(move |event| match &event {
        PipelineEvent::StepStarted { step, .. } => {
            bar.set_message(step.clone());
        }
        PipelineEvent::StepSkipped { .. }
        | PipelineEvent::StepSucceeded { .. }
        | PipelineEvent::StepFailed { .. } => {
            bar.println(format_event(&event));
            bar.inc(1);
        }
        _ => {}
    });

    let mut ctx = TaskContext::new();
    let result = runner.run(&pipeline, &mut ctx).await;
    progress.finish_and_clear();

    let invocation: Vec<String> = std::env::args().collect();
    let reporter = ResultReporter::new(telemetry);
    reporter.report(&invocation, &result).await
}
