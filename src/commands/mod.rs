mod config;
mod notion;
mod org;
mod things;

use anyhow::Result;
pub use config::handle_config;
pub use notion::handle_notion;
pub use org::handle_org;
pub use things::handle_things;

use crate::{cli::Commands, config::Config};

/// Dispatches CLI commands to their respective handlers
pub fn handle_command(config: &Config, cmd: Commands) -> Result<()> {
	match cmd {
		Commands::Org { source, dest } => handle_org(&config.org, &source, &dest),
		Commands::Things { dest, database } => handle_things(&config.things, &dest, database),
		Commands::Notion { archive, dest } => handle_notion(&archive, &dest),
		Commands::Config { show } => handle_config(config, show),
	}
}
