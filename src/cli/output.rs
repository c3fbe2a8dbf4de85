//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ContentError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ContentError) -> String {
    match e {
        ContentError::ConfigError(msg) => format!("configuration: {}", msg),
        ContentError::ImportError(msg) => format!("tree document: {}", msg),
        ContentError::ItemNotFound(id) => format!("tree document has no item {}", id),
        other => other.to_string(),
    }
}
