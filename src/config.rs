//! Configuration System
//!
//! Layered configuration for the host registry, path resolution and logging.
//! Sources are merged in order: built-in defaults, the global file, workspace
//! files, then `FOLIO_*` environment variables.

use crate::host::HostConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Site definitions and tree roots
    #[serde(default)]
    pub host: HostConfig,

    /// Path resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Extension appended to page names in URLs, e.g. ".html"
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    ".html".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.extension.is_empty() && !self.extension.starts_with('.') {
            return Err(format!(
                "extension '{}' must be empty or start with '.'",
                self.extension
            ));
        }
        if self.extension.contains('/') {
            return Err("extension cannot contain '/'".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Host(String),
    Resolver(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Host(msg) => write!(f, "Host: {}", msg),
            ValidationError::Resolver(msg) => write!(f, "Resolver: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FolioConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.host.validate() {
            errors.push(ValidationError::Host(e));
        }
        if let Err(e) = self.resolver.validate() {
            errors.push(ValidationError::Resolver(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
