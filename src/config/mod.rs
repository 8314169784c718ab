mod logging;
mod org;
mod things;

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
pub use logging::LogConfig;
use logging::VALID_LEVELS;
pub use org::OrgConfig;
use serde::{Deserialize, Serialize};
pub use things::ThingsConfig;

/// Configuration for obsidian-migrate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
	#[serde(default)]
	pub log:    LogConfig,
	#[serde(default)]
	pub org:    OrgConfig,
	#[serde(default)]
	pub things: ThingsConfig,
}

impl Config {
	/// Loads configuration from the default config file path.
	/// Falls back to defaults when no file exists yet.
	pub fn load() -> Result<Self> { Self::load_from(&Self::get_config_path()?) }

	/// Loads configuration from an explicit path, using defaults if it is
	/// missing.
	pub fn load_from(config_path: &Path) -> Result<Self> {
		if !config_path.exists() {
			return Ok(Self::default());
		}

		let config_str = fs::read_to_string(config_path)
			.with_context(|| format!("Failed to read config file {}", config_path.display()))?;

		let config: Self = toml::from_str(&config_str)
			.with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
		config.validate()?;
		Ok(config)
	}

	/// Saves the configuration to the default config file path with inline
	/// comments.
	pub fn save(&self) -> Result<()> { self.save_to(&Self::get_config_path()?) }

	pub fn save_to(&self, config_path: &Path) -> Result<()> {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent).context("Failed to create config directory")?;
		}

		fs::write(config_path, self.to_toml_with_comments()).context("Failed to write config file")?;

		Ok(())
	}

	/// Generates TOML string with helpful inline comments for each field
	fn to_toml_with_comments(&self) -> String {
		format!(
			r#"# obsidian-migrate configuration file
# Edit this file to customize how notes are migrated

[log]
# Default log level when RUST_LOG is unset: error, warn, info, debug or trace
level = {level}

[org]
# Document converter looked up on PATH
converter = {converter}
# Extension (without the dot) of outline files to convert
extension = {extension}

[things]
{database}"#,
			level = toml_string(&self.log.level),
			converter = toml_string(&self.org.converter),
			extension = toml_string(&self.org.extension),
			database = if let Some(ref database) = self.things.database {
				format!("database = {}\n", toml_string(&database.to_string_lossy()))
			} else {
				"# database = \"/path/to/main.sqlite\"\n".to_string()
			},
		)
	}

	/// Returns the platform-specific configuration file path.
	/// Priority order:
	/// 1. $XDG_CONFIG_HOME/obsidian-migrate/config.toml
	/// 2. ~/.config/obsidian-migrate/config.toml (Unix)
	/// 3. ~/Library/Application Support/obsidian-migrate/config.toml (macOS
	///    fallback)
	/// 4. %APPDATA%\obsidian-migrate\config.toml (Windows)
	pub fn get_config_path() -> Result<PathBuf> {
		let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
			PathBuf::from(xdg_config)
		} else if cfg!(target_os = "macos") {
			let home = dirs::home_dir().context("Failed to get home directory")?;
			let xdg_path = home.join(".config");
			if xdg_path.exists() {
				xdg_path
			} else {
				dirs::config_dir().unwrap_or_else(|| home.join("Library/Application Support"))
			}
		} else {
			dirs::config_dir().context("Failed to get config directory")?
		};

		Ok(config_dir.join("obsidian-migrate").join("config.toml"))
	}

	/// Validates the configuration values.
	pub fn validate(&self) -> Result<()> {
		if !VALID_LEVELS.contains(&self.log.level.as_str()) {
			anyhow::bail!("log.level must be one of: {}", VALID_LEVELS.join(", "));
		}

		if self.org.converter.trim().is_empty() {
			anyhow::bail!("org.converter must not be empty");
		}

		if self.org.extension.trim().is_empty() || self.org.extension.contains('.') {
			anyhow::bail!("org.extension must be a bare extension such as \"org\"");
		}

		Ok(())
	}
}

/// Quotes a value as a TOML basic string.
fn toml_string(value: &str) -> String { toml::Value::String(value.to_string()).to_string() }
