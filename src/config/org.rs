use serde::{Deserialize, Serialize};

/// Org-mode importer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgConfig {
	/// Document converter looked up on PATH (invoked as `<converter> -s <src>
	/// -o <dst>`)
	#[serde(default = "default_converter")]
	pub converter: String,

	/// File extension (without the dot) of outline files to convert
	#[serde(default = "default_extension")]
	pub extension: String,
}

fn default_converter() -> String { "pandoc".to_string() }

fn default_extension() -> String { "org".to_string() }

impl Default for OrgConfig {
	fn default() -> Self { Self { converter: default_converter(), extension: default_extension() } }
}
