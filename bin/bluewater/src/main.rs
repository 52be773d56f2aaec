#![allow(missing_docs)]

use bluewater_cli::{
    args::{Args, Commands},
    cmd::{commitments_root::CommitmentsRootCmd, init::InitCmd, local_header::LocalHeaderCmd},
    config::{self, Config},
    logging,
};
use color_eyre::eyre::{Result, eyre};
use tracing::{info, trace};

/// Main entry point for the application
///
/// This function:
/// - Parses command-line arguments
/// - Loads configuration from file
/// - Initializes logging system
/// - Sets up error handling
/// - Dispatches the subcommand
fn main() -> Result<()> {
    color_eyre::install()?;

    // Also forward panics to tracing so they show up alongside the logs.
    install_tracing_panic_hook();

    let args = Args::new();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)
            .map_err(|error| eyre!("Failed to load configuration file: {error}"))?,
        None => {
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Command-line logging flags take precedence over the configuration file.
    if let Some(log_level) = args.log_level {
        config.logging.log_level = log_level;
    }
    if let Some(log_format) = args.log_format {
        config.logging.log_format = log_format;
    }

    // This is a drop guard responsible for flushing any remaining logs when the program terminates.
    // It must be assigned to a binding that is not _, as _ will result in the guard being dropped
    // immediately.
    let _guard = logging::init(config.logging.log_level, config.logging.log_format);

    trace!("Command-line parameters: {args:?}");
    trace!(?config, "Configuration");

    match &args.command {
        Commands::LocalHeader(cmd) => local_header(cmd, &config),
        Commands::CommitmentsRoot(cmd) => commitments_root(cmd),
        Commands::Init(cmd) => cmd_init(cmd),
    }
}

fn install_tracing_panic_hook() {
    use std::panic;

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let msg: &str = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "panic"
        };

        tracing::error!(target = "panic", %location, message = %msg, "panic occurred");

        default_hook(info);
    }));
}

fn local_header(cmd: &LocalHeaderCmd, config: &Config) -> Result<()> {
    let rt = config.runtime.build_runtime()?;

    let header = rt.block_on(cmd.run(config))?;
    let root = header.hash_tree_root();
    info!(%root, block_hash = %header.block_hash, "Local header ready");

    let output = serde_json::json!({ "header": header, "hash_tree_root": root });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn commitments_root(cmd: &CommitmentsRootCmd) -> Result<()> {
    let root = cmd.run()?;
    println!("{root}");
    Ok(())
}

fn cmd_init(cmd: &InitCmd) -> Result<()> {
    cmd.run().map_err(|error| eyre!("Failed to run init command: {error}"))
}
