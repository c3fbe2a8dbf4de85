//! CLI parse: clap types for Folio. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio CLI - inspect content trees and site configuration
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Inspect content trees, path resolution and site configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the default site and configured sites
    Sites {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve a request path against a content tree
    Resolve {
        /// JSON document describing the tree
        #[arg(long)]
        tree: PathBuf,
        /// Host authority of the request, e.g. example.com:8080
        #[arg(long)]
        host: Option<String>,
        /// Request path, optionally with a query string
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a content tree with paths and sort orders
    Tree {
        /// JSON document describing the tree
        #[arg(long)]
        tree: PathBuf,
    },
    /// Validate the effective configuration
    Validate,
}
