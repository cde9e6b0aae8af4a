//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Enable the experimental Docker deployment in a project
#[derive(Debug, Args, Clone)]
pub struct SetupCommand {
    /// Project directory containing drydock.toml
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,

    /// Replace deployment files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Don't report failures to the telemetry sink
    #[arg(long)]
    pub no_telemetry: bool,
}
