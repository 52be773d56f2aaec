//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    cmd::{commitments_root::CommitmentsRootCmd, init::InitCmd, local_header::LocalHeaderCmd},
    config::{LogFormat, LogLevel},
};

#[derive(Parser, Clone, Debug, Default)]
#[command(name = "bluewater", version, about = "Local ePBS execution payload header builder")]
pub struct Args {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Log format, overriding the configuration file
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Build a local execution payload header against a running execution engine
    LocalHeader(LocalHeaderCmd),

    /// Compute the SSZ root of a list of KZG commitments
    CommitmentsRoot(CommitmentsRootCmd),

    /// Write a configuration file with default values
    Init(InitCmd),
}

impl Default for Commands {
    fn default() -> Self {
        Self::CommitmentsRoot(CommitmentsRootCmd::default())
    }
}

impl Args {
    pub fn new() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "bluewater",
            "commitments-root",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--config",
            "/etc/bluewater.toml",
        ]);

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.log_format, Some(LogFormat::Json));
        assert_eq!(args.config, Some(PathBuf::from("/etc/bluewater.toml")));
        assert!(matches!(args.command, Commands::CommitmentsRoot(_)));
    }
}
