//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::SetupCommand;

/// Container deployment scaffolding for yarn workspace projects
#[derive(Debug, Parser, Clone)]
#[command(name = "drydock")]
#[command(author = "Drydock Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Scaffolds an experimental Docker deployment into yarn workspace projects", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Enable the experimental Docker deployment in a project
    Setup(SetupCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_flags_parse() {
        let cli = Cli::try_parse_from(["drydock", "setup", "--force", "--overwrite"]).unwrap();

        let Command::Setup(cmd) = &cli.command;
        assert!(cmd.force);
        assert!(cmd.overwrite);
        assert!(!cmd.no_telemetry);
        assert_eq!(cmd.project, std::path::PathBuf::from("."));
    }

    #[test]
    fn test_project_dir_override() {
        let cli =
            Cli::try_parse_from(["drydock", "setup", "--project", "/srv/app", "-v"]).unwrap();

        assert!(cli.verbose);
        let Command::Setup(cmd) = &cli.command;
        assert_eq!(cmd.project, std::path::PathBuf::from("/srv/app"));
        assert!(!cmd.force);
    }
}
