use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Things importer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThingsConfig {
	/// Explicit path to `main.sqlite`; when unset the database is located
	/// under the Things group container in $HOME
	#[serde(default)]
	pub database: Option<PathBuf>,
}
