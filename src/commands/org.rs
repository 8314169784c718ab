use std::{ffi::OsStr, fs, path::Path};

use anyhow::{Context, Result};
use log::{debug, info};
use walkdir::WalkDir;

use crate::{
	config::OrgConfig,
	utils::{absolute_arg, has_extension, org_target_name, run_captured},
};

/// Handles the org command - converts every outline file under `source`
/// into markdown under `dest`
pub fn handle_org(config: &OrgConfig, source: &Path, dest: &Path) -> Result<()> {
	let org_folder = absolute_arg(source, "org folder is required")?;
	let dest_folder = absolute_arg(dest, "dest folder is required")?;

	let converter = which::which(&config.converter)
		.with_context(|| format!("Could not find document converter '{}' on PATH", config.converter))?;
	info!("Using converter {}", converter.display());

	let converted = migrate_org(&converter, &config.extension, &org_folder, &dest_folder)?;
	println!("Converted {converted} file(s) into {}", dest_folder.display());
	Ok(())
}

/// Walks `org_folder` and runs `converter` once per outline file, mirroring
/// the relative directory layout under `dest_folder`. Stops at the first
/// failure. Returns the number of converted files.
pub fn migrate_org(converter: &Path, extension: &str, org_folder: &Path, dest_folder: &Path) -> Result<usize> {
	let mut converted = 0;

	for entry in WalkDir::new(org_folder) {
		let entry = entry.with_context(|| format!("Failed to walk {}", org_folder.display()))?;
		if entry.file_type().is_dir() || !has_extension(entry.path(), extension) {
			continue;
		}

		let relative = entry.path().strip_prefix(org_folder)?;
		let target_dir = match relative.parent() {
			Some(parent) => dest_folder.join(parent),
			None => dest_folder.to_path_buf(),
		};
		let target_path = target_dir.join(org_target_name(&entry.file_name().to_string_lossy(), extension));

		fs::create_dir_all(&target_dir)
			.with_context(|| format!("Failed to create directory {}", target_dir.display()))?;

		debug!("Converting {} -> {}", entry.path().display(), target_path.display());
		convert(converter, entry.path(), &target_path)?;
		info!("Wrote {}", target_path.display());
		converted += 1;
	}

	Ok(converted)
}

/// Runs `<converter> -s <source> -o <target>`.
fn convert(converter: &Path, source: &Path, target: &Path) -> Result<()> {
	run_captured(converter, [OsStr::new("-s"), source.as_os_str(), OsStr::new("-o"), target.as_os_str()])
		.with_context(|| format!("Failed to convert {}", source.display()))
}

#[cfg(test)]
mod tests {
	#[cfg(unix)]
	use std::{os::unix::fs::PermissionsExt, path::PathBuf};

	use tempfile::TempDir;

	use super::*;

	/// Writes a fake converter that copies its `-s <src>` argument to its `-o
	/// <dst>` argument, or fails for files named `broken.org`.
	#[cfg(unix)]
	fn fake_converter(dir: &Path) -> PathBuf {
		let path = dir.join("fake-pandoc");
		fs::write(
			&path,
			"#!/bin/sh\n\
			 [ \"$1\" = \"-s\" ] || exit 64\n\
			 case \"$2\" in *broken.org) echo \"cannot parse $2\"; echo 'pandoc: parse error' >&2; exit 1;; esac\n\
			 cp \"$2\" \"$4\"\n",
		)
		.unwrap();
		fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
		path
	}

	#[test]
	#[cfg(unix)]
	fn mirrors_tree_and_renames_files() {
		let tmp = TempDir::new().unwrap();
		let converter = fake_converter(tmp.path());
		let source = tmp.path().join("org");
		let dest = tmp.path().join("vault");
		fs::create_dir_all(source.join("roam/daily")).unwrap();
		fs::write(source.join("inbox.org"), "* TODO inbox").unwrap();
		fs::write(source.join("roam/20230101-My_Note.org"), "* My note").unwrap();
		fs::write(source.join("roam/daily/2023-06-01.org"), "* Daily").unwrap();
		fs::write(source.join("roam/readme.txt"), "not an outline").unwrap();

		let converted = migrate_org(&converter, "org", &source, &dest).unwrap();

		assert_eq!(converted, 3);
		assert_eq!(fs::read_to_string(dest.join("inbox.md")).unwrap(), "* TODO inbox");
		assert_eq!(fs::read_to_string(dest.join("roam/My Note.md")).unwrap(), "* My note");
		assert!(dest.join("roam/daily/06-01.md").exists());
		assert!(!dest.join("roam/readme.txt").exists());
		assert!(!dest.join("roam/readme.md").exists());
	}

	#[test]
	#[cfg(unix)]
	fn converter_failure_aborts_with_output() {
		let tmp = TempDir::new().unwrap();
		let converter = fake_converter(tmp.path());
		let source = tmp.path().join("org");
		fs::create_dir_all(&source).unwrap();
		fs::write(source.join("broken.org"), "#+TITLE").unwrap();

		let err = migrate_org(&converter, "org", &source, &tmp.path().join("vault")).unwrap_err();
		let message = format!("{err:#}");
		assert!(message.contains("Failed to convert"), "{message}");
		assert!(message.contains("stdout: cannot parse"), "{message}");
		assert!(message.contains("stderr: pandoc: parse error"), "{message}");
	}

	#[test]
	#[cfg(unix)]
	fn rerun_overwrites_existing_output() {
		let tmp = TempDir::new().unwrap();
		let converter = fake_converter(tmp.path());
		let source = tmp.path().join("org");
		let dest = tmp.path().join("vault");
		fs::create_dir_all(&source).unwrap();
		fs::write(source.join("note.org"), "first").unwrap();
		migrate_org(&converter, "org", &source, &dest).unwrap();

		fs::write(source.join("note.org"), "second").unwrap();
		migrate_org(&converter, "org", &source, &dest).unwrap();
		assert_eq!(fs::read_to_string(dest.join("note.md")).unwrap(), "second");
	}

	#[test]
	fn missing_converter_fails_before_walking() {
		let tmp = TempDir::new().unwrap();
		let config = OrgConfig { converter: "definitely-not-a-real-converter".to_string(), extension: "org".to_string() };
		let dest = tmp.path().join("vault");

		let err = handle_org(&config, tmp.path(), &dest).unwrap_err();
		assert!(err.to_string().contains("definitely-not-a-real-converter"));
		assert!(!dest.exists());
	}

	#[test]
	fn empty_arguments_are_rejected() {
		let config = OrgConfig::default();
		let err = handle_org(&config, Path::new(""), Path::new("vault")).unwrap_err();
		assert_eq!(err.to_string(), "org folder is required");

		let err = handle_org(&config, Path::new("org"), Path::new("")).unwrap_err();
		assert_eq!(err.to_string(), "dest folder is required");
	}
}
