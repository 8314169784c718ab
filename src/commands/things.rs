use std::{
	collections::{HashMap, HashSet},
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
	config::ThingsConfig,
	db::{Area, Task, ThingsDatabase, locate_database},
	utils::{absolute_arg, sanitize_path_segment, task_to_markdown},
};

/// Outcome counts for one Things migration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ThingsSummary {
	pub written:  usize,
	pub inactive: usize,
	pub groups:   usize,
}

/// Handles the things command - exports active Things tasks as task notes
pub fn handle_things(config: &ThingsConfig, dest: &Path, database: Option<PathBuf>) -> Result<()> {
	let dest_folder = absolute_arg(dest, "dest folder is required")?;

	let db_path = match database.or_else(|| config.database.clone()) {
		Some(path) => path,
		None => locate_database()?,
	};
	println!("{}", db_path.display());

	let summary = migrate_things(&db_path, &dest_folder)?;
	println!(
		"Wrote {} task(s) into {} ({} inactive, {} projects/headings skipped)",
		summary.written,
		dest_folder.display(),
		summary.inactive,
		summary.groups
	);
	Ok(())
}

/// Reads every area and task from the database at `db_path` and writes one
/// markdown file per active, non-group task under `dest_folder`.
pub fn migrate_things(db_path: &Path, dest_folder: &Path) -> Result<ThingsSummary> {
	let db = ThingsDatabase::open(db_path)?;
	let areas = db.list_areas()?;
	let tasks = db.list_tasks()?;
	info!("Loaded {} area(s) and {} task(s) from {}", areas.len(), tasks.len(), db_path.display());

	let is_group = group_ids(&tasks);
	let areas_by_id: HashMap<String, Area> = areas.into_iter().map(|area| (area.uuid.clone(), area)).collect();
	let tasks_by_id: HashMap<String, Task> = tasks.iter().map(|task| (task.uuid.clone(), task.clone())).collect();

	let mut summary = ThingsSummary::default();
	for task in &tasks {
		if !task.is_active() {
			debug!("Skipping inactive task {} ({})", task.uuid, task.title);
			summary.inactive += 1;
			continue;
		}
		if is_group.contains(task.uuid.as_str()) {
			debug!("Skipping group {} ({}), type {}", task.uuid, task.title, task.kind);
			summary.groups += 1;
			continue;
		}

		let target_dir = dest_folder.join(task.hierarchy(&areas_by_id, &tasks_by_id).path());
		let target_path = target_dir.join(format!("{}.md", sanitize_path_segment(&task.title)));

		fs::create_dir_all(&target_dir)
			.with_context(|| format!("Failed to create directory {}", target_dir.display()))?;
		fs::write(&target_path, task_to_markdown(task))
			.with_context(|| format!("Failed to write {}", target_path.display()))?;
		info!("Wrote {}", target_path.display());
		summary.written += 1;
	}

	Ok(summary)
}

/// Ids of every task some other task points at as its project or heading.
fn group_ids(tasks: &[Task]) -> HashSet<&str> {
	tasks
		.iter()
		.flat_map(|task| [task.project.as_deref(), task.heading.as_deref()])
		.flatten()
		.collect()
}
