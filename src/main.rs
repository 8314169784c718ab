mod cli;
mod commands;
mod config;
mod db;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::handle_command;
use config::{Config, LogConfig};

/// Initializes env_logger. RUST_LOG wins over `-v`, which wins over the
/// configured level.
fn init_logging(config: &LogConfig, verbose: u8) {
	let level = match verbose {
		0 => config.level.as_str(),
		1 => "info",
		2 => "debug",
		_ => "trace",
	};

	env_logger::Builder::new().parse_filters(level).parse_env("RUST_LOG").format_timestamp(None).init();
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	let config = Config::load().context("Failed to load configuration")?;
	init_logging(&config.log, cli.verbose);

	handle_command(&config, cli.command)
}
