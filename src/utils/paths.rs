//! Helpers for command-line path arguments.

use std::{
	ffi::OsStr,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Rejects an empty path argument with `missing`, otherwise returns it made
/// absolute against the current directory.
pub fn absolute_arg(path: &Path, missing: &str) -> Result<PathBuf> {
	if path.as_os_str().is_empty() {
		anyhow::bail!("{missing}");
	}
	std::path::absolute(path).with_context(|| format!("Failed to resolve path {}", path.display()))
}

/// Returns true if `path` ends in `.<extension>` (case-sensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool { path.extension() == Some(OsStr::new(extension)) }

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_argument_reports_message() {
		let err = absolute_arg(Path::new(""), "dest folder is required").unwrap_err();
		assert_eq!(err.to_string(), "dest folder is required");
	}

	#[test]
	fn relative_argument_becomes_absolute() {
		let resolved = absolute_arg(Path::new("vault"), "dest folder is required").unwrap();
		assert!(resolved.is_absolute());
		assert!(resolved.ends_with("vault"));
	}

	#[test]
	fn matches_extension_exactly() {
		assert!(has_extension(Path::new("a/b/Export.zip"), "zip"));
		assert!(!has_extension(Path::new("a/b/Export.zip.md"), "zip"));
		assert!(!has_extension(Path::new("zip"), "zip"));
	}
}
