//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_resolution, format_sites, format_tree};
use crate::config::{ConfigLoader, FolioConfig};
use crate::content::ContentTree;
use crate::error::ContentError;
use crate::host::{RequestContext, SiteRegistry};
use crate::resolve::resolve_path;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

/// Runtime context for CLI execution: loaded configuration and the site registry
pub struct RunContext {
    config: FolioConfig,
    registry: SiteRegistry,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ContentError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: FolioConfig) -> Self {
        let registry = SiteRegistry::from_config(&config.host);
        Self {
            config,
            registry,
            workspace_root,
        }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Run `command` and return its printable output
    pub fn execute(&self, command: &Commands) -> Result<String, ContentError> {
        let span = info_span!("command", name = crate::cli::command_name(command));
        let _guard = span.enter();

        match command {
            Commands::Sites { format } => format_sites(&self.registry.snapshot(), format),
            Commands::Resolve {
                tree,
                host,
                path,
                format,
            } => self.handle_resolve(tree, host.as_deref(), path, format),
            Commands::Tree { tree } => {
                let (tree, root) = self.load_tree(tree)?;
                format_tree(&tree, root)
            }
            Commands::Validate => self.handle_validate(),
        }
    }

    fn load_tree(&self, path: &Path) -> Result<(ContentTree, crate::types::NodeRef), ContentError> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        };
        debug!(tree = %path.display(), "Loading tree document");
        ContentTree::from_json_file(&path)
    }

    fn handle_resolve(
        &self,
        tree_path: &Path,
        host: Option<&str>,
        path: &str,
        format: &str,
    ) -> Result<String, ContentError> {
        let (tree, _root) = self.load_tree(tree_path)?;
        let request = host.map(RequestContext::new).unwrap_or_default();
        let site = self.registry.current_site(&request);
        let start = tree.node_for_id(site.start_page_id)?;
        debug!(site = %site.name, start = %start, "Resolving against site start page");
        let extension = &self.config.resolver.extension;
        let result = resolve_path(&tree, start, path, extension);
        format_resolution(&tree, &result, extension, format)
    }

    fn handle_validate(&self) -> Result<String, ContentError> {
        match self.config.validate() {
            Ok(()) => Ok(format!(
                "Configuration is valid ({} site(s) configured)",
                self.config.host.sites.len()
            )),
            Err(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                Err(ContentError::ConfigError(format!(
                    "Configuration validation failed:\n{}",
                    messages.join("\n")
                )))
            }
        }
    }
}
