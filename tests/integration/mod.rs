//! Integration tests for the Folio content tree and site registry

mod cloning_versions;
mod config_integration;
mod content_sources;
mod path_resolution;
mod site_registry;
mod test_utils;
mod tree_structure;
