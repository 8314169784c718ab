//! Read-only access to the Things 3 database.
//!
//! Things keeps its data in a SQLite file inside a macOS group container.
//! Only the columns the migration needs are read; the schema is the one
//! shipped as of 2023-06-01 and may drift in later Things releases:
//! - TMArea: uuid, title, index
//! - TMTask: uuid, type, stopDate, trashed, title, notes, startDate, index,
//!   area, project, heading
//!
//! Tags live in TMTag with the TMAreaTag/TMTaskTag join tables; they are not
//! carried over.

use std::{
	collections::HashMap,
	env,
	ffi::OsString,
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, Row};

use crate::utils::sanitize_path_segment;

/// Group container Things uses under ~/Library/Group Containers.
/// https://culturedcode.com/things/support/articles/2982272/
const GROUP_CONTAINER: &str = "JLMPQHK86H.com.culturedcode.ThingsMac";

/// Prefix of the per-account data directory inside the group container.
const DATA_DIR_PREFIX: &str = "ThingsData-";

/// Location of the database inside the data directory.
const DATABASE_FILE: [&str; 2] = ["Things Database.thingsdatabase", "main.sqlite"];

/// A top-level Things area.
#[derive(Debug, Clone)]
pub struct Area {
	pub uuid:  String,
	pub title: String,
}

/// A Things to-do, project or heading row.
#[derive(Debug, Clone)]
pub struct Task {
	pub uuid:       String,
	/// 0 = to-do, 1 = project, 2 = heading
	pub kind:       i64,
	pub stop_date:  Option<f64>,
	pub trashed:    bool,
	pub title:      String,
	pub notes:      String,
	/// Day-count encoded start date, see `utils::decode_start_date`
	pub start_date: Option<i64>,
	pub area:       Option<String>,
	pub project:    Option<String>,
	pub heading:    Option<String>,
}

/// The area, project and heading a task is filed under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskHierarchy {
	pub area:    Option<String>,
	pub project: Option<String>,
	pub heading: Option<String>,
}

impl TaskHierarchy {
	/// Joins the present levels, each sanitized, into a relative directory
	/// path ordered area, project, heading.
	pub fn path(&self) -> PathBuf {
		[&self.area, &self.project, &self.heading]
			.into_iter()
			.flatten()
			.map(|title| sanitize_path_segment(title))
			.collect()
	}
}

impl Task {
	/// Completed, cancelled and trashed items all carry a stop date or the
	/// trashed flag.
	pub fn is_active(&self) -> bool { self.stop_date.is_none() && !self.trashed }

	/// Resolves the area/project/heading chain for this task.
	///
	/// At most two references are followed past the task itself: heading to
	/// project, then project (or heading) to area. Cyclic or self references
	/// therefore terminate and simply contribute whatever title they point
	/// at. Dangling references resolve to an absent level.
	pub fn hierarchy(&self, areas: &HashMap<String, Area>, tasks: &HashMap<String, Task>) -> TaskHierarchy {
		let heading = self.heading.as_deref().and_then(|uuid| tasks.get(uuid));

		let project = self
			.project
			.as_deref()
			.or_else(|| heading.and_then(|heading| heading.project.as_deref()))
			.and_then(|uuid| tasks.get(uuid));

		let area = self
			.area
			.as_deref()
			.or_else(|| project.and_then(|project| project.area.as_deref()))
			.or_else(|| heading.and_then(|heading| heading.area.as_deref()))
			.and_then(|uuid| areas.get(uuid));

		TaskHierarchy {
			area:    area.map(|area| area.title.clone()),
			project: project.map(|project| project.title.clone()),
			heading: heading.map(|heading| heading.title.clone()),
		}
	}
}

/// Returns the path to `main.sqlite` for the current user, using $HOME.
pub fn locate_database() -> Result<PathBuf> { locate_database_in(&home_dir_from(env::var_os("HOME"))?) }

/// An unset or empty HOME are both errors.
fn home_dir_from(home: Option<OsString>) -> Result<PathBuf> {
	home.filter(|home| !home.is_empty()).map(PathBuf::from).context("HOME is not set")
}

/// Returns the path to `main.sqlite` under `home`.
/// Fails if the group container has no `ThingsData-*` directory, or more
/// than one.
pub fn locate_database_in(home: &Path) -> Result<PathBuf> {
	let root_dir = home.join("Library").join("Group Containers").join(GROUP_CONTAINER);
	let entries = fs::read_dir(&root_dir)
		.with_context(|| format!("Failed to read Things group container {}", root_dir.display()))?;

	let mut candidates = Vec::new();
	for entry in entries {
		let entry = entry.with_context(|| format!("Failed to read {}", root_dir.display()))?;
		let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
		if is_dir && entry.file_name().to_string_lossy().starts_with(DATA_DIR_PREFIX) {
			candidates.push(entry.path());
		}
	}
	candidates.sort();

	match candidates.as_slice() {
		[] => anyhow::bail!("Missing {DATA_DIR_PREFIX}XXXXX directory in {}", root_dir.display()),
		[data_dir] => Ok(DATABASE_FILE.iter().fold(data_dir.clone(), |path, part| path.join(part))),
		_ => {
			let names: Vec<String> = candidates.iter().map(|path| path.display().to_string()).collect();
			anyhow::bail!("Found more than one {DATA_DIR_PREFIX}XXXXX directory: {}", names.join(", "))
		}
	}
}

/// Read-only SQLite wrapper over a Things database.
pub struct ThingsDatabase {
	conn: Connection,
}

impl ThingsDatabase {
	/// Opens an existing Things database without write access.
	pub fn open(path: &Path) -> Result<Self> {
		let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)
			.with_context(|| format!("Failed to open Things database {}", path.display()))?;
		Ok(Self { conn })
	}

	/// Returns every area in display order.
	pub fn list_areas(&self) -> Result<Vec<Area>> {
		let mut stmt = self
			.conn
			.prepare(r#"SELECT uuid, title FROM TMArea ORDER BY "index""#)
			.context("Failed to query TMArea")?;

		let areas = stmt
			.query_map([], |row| {
				Ok(Area {
					uuid:  row.get(0)?,
					title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
				})
			})?
			.collect::<Result<Vec<_>, _>>()
			.context("Failed to read TMArea rows")?;

		Ok(areas)
	}

	/// Returns every task row in the order SQLite yields them.
	pub fn list_tasks(&self) -> Result<Vec<Task>> {
		let mut stmt = self
			.conn
			.prepare(
				r#"SELECT uuid, type, stopDate, trashed, title, notes, startDate, area, project, heading
				FROM TMTask"#,
			)
			.context("Failed to query TMTask")?;

		let tasks = stmt
			.query_map([], task_from_row)?
			.collect::<Result<Vec<_>, _>>()
			.context("Failed to read TMTask rows")?;

		Ok(tasks)
	}
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
	Ok(Task {
		uuid:       row.get(0)?,
		kind:       row.get::<_, Option<i64>>(1)?.unwrap_or_default(),
		stop_date:  row.get(2)?,
		trashed:    row.get::<_, Option<i64>>(3)?.is_some_and(|trashed| trashed != 0),
		title:      row.get::<_, Option<String>>(4)?.unwrap_or_default(),
		notes:      row.get::<_, Option<String>>(5)?.unwrap_or_default(),
		start_date: row.get(6)?,
		area:       row.get(7)?,
		project:    row.get(8)?,
		heading:    row.get(9)?,
	})
}

/// Test-only helpers for building Things databases on disk.
#[cfg(test)]
pub mod fixtures {
	use rusqlite::{Connection, params};

	use super::*;

	/// Creates the subset of the Things schema this crate reads.
	pub fn create_database(path: &Path) -> Connection {
		let conn = Connection::open(path).unwrap();
		conn.execute_batch(
			r#"CREATE TABLE TMArea (
				uuid TEXT PRIMARY KEY,
				title TEXT,
				visible INTEGER,
				"index" INTEGER
			);
			CREATE TABLE TMTask (
				uuid TEXT PRIMARY KEY,
				type INTEGER,
				status INTEGER,
				stopDate REAL,
				trashed INTEGER,
				title TEXT,
				notes TEXT,
				startDate INTEGER,
				"index" INTEGER,
				area TEXT,
				project TEXT,
				heading TEXT
			);"#,
		)
		.unwrap();
		conn
	}

	pub fn insert_area(conn: &Connection, uuid: &str, title: &str, index: i64) {
		conn.execute(
			r#"INSERT INTO TMArea (uuid, title, visible, "index") VALUES (?1, ?2, NULL, ?3)"#,
			params![uuid, title, index],
		)
		.unwrap();
	}

	/// Row builder for TMTask; defaults to an active to-do with no parents.
	pub struct TaskRow<'a> {
		pub uuid:       &'a str,
		pub kind:       i64,
		pub title:      &'a str,
		pub notes:      &'a str,
		pub stop_date:  Option<f64>,
		pub trashed:    bool,
		pub start_date: Option<i64>,
		pub area:       Option<&'a str>,
		pub project:    Option<&'a str>,
		pub heading:    Option<&'a str>,
	}

	impl<'a> TaskRow<'a> {
		pub fn new(uuid: &'a str, title: &'a str) -> Self {
			Self {
				uuid,
				kind: 0,
				title,
				notes: "",
				stop_date: None,
				trashed: false,
				start_date: None,
				area: None,
				project: None,
				heading: None,
			}
		}

		pub fn insert(&self, conn: &Connection) {
			conn.execute(
				r#"INSERT INTO TMTask
					(uuid, type, status, stopDate, trashed, title, notes, startDate, "index", area, project, heading)
				VALUES (?1, ?2, 0, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9, ?10)"#,
				params![
					self.uuid,
					self.kind,
					self.stop_date,
					i64::from(self.trashed),
					self.title,
					self.notes,
					self.start_date,
					self.area,
					self.project,
					self.heading,
				],
			)
			.unwrap();
		}
	}
}
