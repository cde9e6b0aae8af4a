//! Failure telemetry sinks

use anyhow::Result;
use async_trait::async_trait;

/// Trait for reporting pipeline failures to an observability sink
///
/// Delivery is best-effort: the reporter logs a sink failure at debug
/// level and never lets it mask the original pipeline error.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record a failed run: the invocation arguments and the error message
    async fn record_failure(&self, invocation: &[String], message: &str) -> Result<()>;
}

/// Emits failures as structured tracing events
///
/// The default sink: it rides whatever subscriber the process installed,
/// so collectors attach at the logging layer rather than inside the
/// pipeline.
#[derive(Debug, Clone, Default)]
pub struct TracingTelemetry;

#[async_trait]
impl TelemetrySink for TracingTelemetry {
    async fn record_failure(&self, invocation: &[String], message: &str) -> Result<()> {
        tracing::error!(
            target: "drydock::telemetry",
            invocation = %invocation.join(" "),
            error = %message,
            "setup failed"
        );
        Ok(())
    }
}

/// Discards everything; selected by `--no-telemetry`
#[derive(Debug, Clone, Default)]
pub struct NoopTelemetry;

#[async_trait]
impl TelemetrySink for NoopTelemetry {
    async fn record_failure(&self, _invocation: &[String], _message: &str) -> Result<()> {
        Ok(())
    }
}
