//! Folio: hierarchical content tree for multi-site publishing
//!
//! An arena-backed tree of pages and parts with ordered children, sparse
//! detail storage, version snapshots and URL path resolution, plus a
//! thread-safe registry mapping host authorities to sites in the tree.

pub mod cli;
pub mod config;
pub mod content;
pub mod details;
pub mod error;
pub mod filter;
pub mod host;
pub mod logging;
pub mod resolve;
pub mod source;
pub mod types;

pub use content::{ContentItem, ContentTree, ItemKind};
pub use error::ContentError;
pub use host::{RequestContext, Site, SiteRegistry};
pub use resolve::{get_child, resolve_path, resolve_url, PathResult};
pub use types::{ItemId, NodeRef, TRANSIENT_ID};
