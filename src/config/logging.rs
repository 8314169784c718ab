use serde::{Deserialize, Serialize};

/// Log levels accepted by `log.level`.
pub const VALID_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
	/// Default log level when RUST_LOG is unset: error, warn, info, debug or
	/// trace
	#[serde(default = "default_level")]
	pub level: String,
}

fn default_level() -> String { "warn".to_string() }

impl Default for LogConfig {
	fn default() -> Self { Self { level: default_level() } }
}
