//! Subprocess execution with captured output.

use std::{ffi::OsStr, path::Path, process::Command};

use anyhow::{Context, Result};

/// Runs `program` with `args` to completion, capturing stdout and stderr.
/// A non-zero exit turns into an error carrying both captured streams.
pub fn run_captured<I, S>(program: &Path, args: I) -> Result<()>
where
	I: IntoIterator<Item = S>,
	S: AsRef<OsStr>,
{
	let output = Command::new(program)
		.args(args)
		.output()
		.with_context(|| format!("failed to execute {}", program.display()))?;

	if !output.status.success() {
		anyhow::bail!(
			"failed to execute {}: {}\nstdout: {}\nstderr: {}",
			program.display(),
			output.status,
			String::from_utf8_lossy(&output.stdout),
			String::from_utf8_lossy(&output.stderr),
		);
	}
	Ok(())
}
