//! sealedsecret CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sealedsecret_core::{load_sealer_config, log};

mod cli;
mod commands;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = load_sealer_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level_override() {
        config.log.level = level;
    }

    let _guard = log::init(&config.log).context("Failed to initialize logging")?;
    tracing::debug!(
        version = sealedsecret_core::VERSION,
        payload_binding = %config.payload_binding,
        "configuration loaded"
    );

    cli.execute(config)
}
