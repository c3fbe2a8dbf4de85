//! Single entry point for loading configuration.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::FolioConfig;
use crate::error::ContentError;
use std::path::Path;
use tracing::debug;

/// Loads [`FolioConfig`] from layered sources or a single file
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`.
    ///
    /// Later sources override earlier ones: defaults, global file, workspace
    /// files, then environment.
    pub fn load(workspace_root: &Path) -> Result<FolioConfig, ContentError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);

        let config: FolioConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            sites = config.host.sites.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration from one TOML file, ignoring every other source
    pub fn load_from_file(path: &Path) -> Result<FolioConfig, ContentError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            ContentError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Built-in defaults with no file or environment input
    pub fn defaults() -> FolioConfig {
        FolioConfig::default()
    }
}
