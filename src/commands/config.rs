use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
	config::{Config, ThingsConfig},
	db::locate_database,
	utils::confirm,
};

/// Handles the config command - prints the effective configuration with
/// `--show`, otherwise writes a commented default file
pub fn handle_config(config: &Config, show: bool) -> Result<()> {
	let config_path = Config::get_config_path()?;

	if show {
		show_config(config, &config_path)
	} else {
		generate_config(&config_path)
	}
}

fn show_config(config: &Config, config_path: &Path) -> Result<()> {
	let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
	let state = if config_path.exists() { "" } else { " (not created yet, defaults in use)" };

	println!("# {}{state}\n", config_path.display());
	println!("{rendered}");
	println!("Things database: {}", things_source(&config.things, locate_database));
	Ok(())
}

fn generate_config(config_path: &Path) -> Result<()> {
	if config_path.exists() && !confirm(&format!("{} exists. Replace it with the defaults?", config_path.display())) {
		println!("Left {} unchanged.", config_path.display());
		return Ok(());
	}

	Config::default().save()?;
	println!("Wrote default configuration to {}", config_path.display());
	Ok(())
}

/// Describes where the things command would read from: the configured
/// override, or the auto-detected store under $HOME.
fn things_source(config: &ThingsConfig, locate: impl FnOnce() -> Result<PathBuf>) -> String {
	match &config.database {
		Some(path) => format!("{} (from config)", path.display()),
		None => match locate() {
			Ok(path) => format!("{} (detected)", path.display()),
			Err(err) => format!("not found ({err})"),
		},
	}
}
