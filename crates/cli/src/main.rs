//! phrase-tagger CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands};
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit with 1; --help and --version exit with 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize logging: RUST_LOG, then --log-level, then config, then "warn".
    // Config errors are reported by the command itself.
    let config = AppConfig::load(cli.config.as_deref()).unwrap_or_default();
    init_logging(config.log_level(cli.log_level.as_deref()))?;

    // Execute command
    match cli.command {
        Commands::Classify(args) => {
            commands::classify::execute(args, cli.config, cli.hierarchy).await
        }
        Commands::Hierarchy(args) => {
            commands::hierarchy::execute(args, cli.config, cli.hierarchy).await
        }
        Commands::Config(args) => commands::config::execute(args).await,
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config, cli.hierarchy).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
