//! Command-line interface for obsidian-migrate.
//!
//! Each subcommand runs one import pipeline end to end:
//! - org: Convert a folder of org-mode files with pandoc
//! - things: Export active Things 3 tasks as Obsidian task notes
//! - notion: Unpack a Notion workspace export
//! - config: Generate or show the configuration file

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Main CLI structure parsed by clap.
#[derive(Parser)]
#[command(name = "obsidian-migrate")]
#[command(about = "Migrate notes from other formats to obsidian", long_about = None)]
pub struct Cli {
	/// Increase log output (-v for info, -vv for debug)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
	/// Migrate org-mode files to obsidian
	Org {
		/// Folder containing .org files (searched recursively)
		source: PathBuf,
		/// Destination vault folder
		dest: PathBuf,
	},
	/// Migrate the Things.app database to obsidian
	Things {
		/// Destination vault folder
		dest: PathBuf,
		/// Read this database instead of locating the Things data directory
		#[arg(short, long)]
		database: Option<PathBuf>,
	},
	/// Migrate a Notion workspace export to obsidian
	Notion {
		/// Export .zip (Settings > Export content > Export all workspace content)
		archive: PathBuf,
		/// Destination vault folder
		dest: PathBuf,
	},
	/// Generate or show configuration file
	Config {
		/// Show current configuration instead of generating
		#[arg(short, long)]
		show: bool,
	},
}
