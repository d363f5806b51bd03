//! Cachet - Entry Point
//!
//! Binary entry point for the cachet command line tool.

use cachet::cli::{Cli, execute};
use cachet::infrastructure::{CacheFactory, init_logging};
use clap::Parser;
use serde_json::Value;
use std::process::ExitCode;
use tracing::error;

fn run(cli: &Cli) -> cachet::Result<String> {
    let config = cli.load_config()?;
    init_logging(config.logging.clone())?;

    let cache = CacheFactory::create_from_config::<Value>(&config.cache)?;
    execute(cache.as_ref(), &cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("cachet: {e}");
            ExitCode::FAILURE
        }
    }
}
