use std::{
	env,
	fs::{self, File},
	io::{self, Read, Seek},
	path::Path,
};

use anyhow::{Context, Result};
use log::{debug, info};
use zip::ZipArchive;

use crate::utils::{absolute_arg, has_extension, strip_header_lines, strip_path_uuid};

/// Handles the notion command - unpacks a Notion workspace export into `dest`
pub fn handle_notion(archive: &Path, dest: &Path) -> Result<()> {
	let export_file = absolute_arg(
		archive,
		"notion export file required (.zip Settings > Export content > Export all workspace content)",
	)?;
	let dest_folder = absolute_arg(dest, "dest folder is required")?;

	let written = migrate_notion(&export_file, &dest_folder)?;
	println!("Wrote {written} file(s) into {}", dest_folder.display());
	Ok(())
}

/// Writes every file in the export (including files inside nested exports)
/// to `dest_folder` under its id-stripped path. Returns the number of files
/// written.
pub fn migrate_notion(export_file: &Path, dest_folder: &Path) -> Result<usize> {
	unpack_export(export_file, dest_folder, &env::temp_dir())
}

/// Same as `migrate_notion`, extracting nested archives under `scratch_root`.
fn unpack_export(export_file: &Path, dest_folder: &Path, scratch_root: &Path) -> Result<usize> {
	let file = File::open(export_file).with_context(|| format!("Failed to open {}", export_file.display()))?;
	let mut archive =
		ZipArchive::new(file).with_context(|| format!("Failed to read zip archive {}", export_file.display()))?;

	let mut written = 0;
	traverse_archive(&mut archive, scratch_root, &mut |name, contents| {
		if write_entry(dest_folder, name, contents)? {
			written += 1;
		}
		Ok(())
	})?;

	info!("Wrote {written} file(s) from {}", export_file.display());
	Ok(written)
}

/// Calls `visit` with the path and contents of every file in `archive`,
/// descending into nested `.zip` entries.
///
/// Nested archives are extracted into a scratch directory under
/// `scratch_root` owned by this call; it is removed when the call returns,
/// whether or not it succeeded.
fn traverse_archive<R: Read + Seek>(
	archive: &mut ZipArchive<R>,
	scratch_root: &Path,
	visit: &mut dyn FnMut(&Path, Vec<u8>) -> Result<()>,
) -> Result<()> {
	let scratch = tempfile::Builder::new()
		.prefix("notion-export")
		.tempdir_in(scratch_root)
		.with_context(|| format!("Failed to create scratch directory in {}", scratch_root.display()))?;

	for index in 0..archive.len() {
		let mut entry = archive.by_index(index).with_context(|| format!("Failed to read archive entry {index}"))?;
		if entry.is_dir() {
			continue;
		}
		let name = entry
			.enclosed_name()
			.with_context(|| format!("Archive entry has an unsafe path: {}", entry.name()))?;

		if has_extension(&name, "zip") {
			debug!("Descending into nested archive {}", name.display());
			let nested_path = scratch.path().join(format!("{index}.zip"));
			{
				let mut nested_file = File::create(&nested_path)
					.with_context(|| format!("Failed to create {}", nested_path.display()))?;
				io::copy(&mut entry, &mut nested_file)
					.with_context(|| format!("Failed to extract {}", name.display()))?;
			}

			let nested_file = File::open(&nested_path)?;
			let mut nested = ZipArchive::new(nested_file)
				.with_context(|| format!("Failed to read nested zip archive {}", name.display()))?;
			traverse_archive(&mut nested, scratch_root, visit)?;
		} else {
			let mut contents = Vec::new();
			entry.read_to_end(&mut contents).with_context(|| format!("Failed to read {}", name.display()))?;
			visit(&name, contents)?;
		}
	}

	Ok(())
}

/// Writes one archive file to its id-stripped location. Markdown pages lose
/// their Notion header lines first. Returns false for entries that map to no
/// path at all.
fn write_entry(dest_folder: &Path, name: &Path, contents: Vec<u8>) -> Result<bool> {
	let relative = strip_path_uuid(name);
	if relative.as_os_str().is_empty() {
		debug!("Skipping root level entry {}", name.display());
		return Ok(false);
	}

	let contents = if has_extension(name, "md") { strip_header_lines(&contents) } else { contents };

	let target_path = dest_folder.join(relative);
	if let Some(parent) = target_path.parent() {
		fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
	}
	fs::write(&target_path, contents).with_context(|| format!("Failed to write {}", target_path.display()))?;
	info!("Wrote {}", target_path.display());
	Ok(true)
}
