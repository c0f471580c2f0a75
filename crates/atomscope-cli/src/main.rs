mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;
mod viewers;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use console::style;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("{} {}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("atomscope v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Tree(args) => {
            info!("Dispatching to 'tree' command.");
            commands::tree::run(args, config_path)
        }
        Commands::Classify(args) => {
            info!("Dispatching to 'classify' command.");
            commands::classify::run(args, config_path)
        }
        Commands::Open(args) => {
            info!("Dispatching to 'open' command.");
            commands::open::run(args, config_path)
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
