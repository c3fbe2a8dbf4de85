//! Error types for the Folio content tree.

use crate::types::{ItemId, NodeRef};
use thiserror::Error;

/// Errors raised by tree, detail and registry operations
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeRef),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("No content source provides {0}")]
    NoSource(NodeRef),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ContentError {
    fn from(err: config::ConfigError) -> Self {
        ContentError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::ImportError(err.to_string())
    }
}
