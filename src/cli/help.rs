//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name recorded on the command span (e.g. "sites", "resolve").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Sites { .. } => "sites",
        Commands::Resolve { .. } => "resolve",
        Commands::Tree { .. } => "tree",
        Commands::Validate => "validate",
    }
}
