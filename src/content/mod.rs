//! Content Tree
//!
//! The hierarchical item model: an arena of [`ContentItem`]s linked by
//! parent/child handles, with sibling ordering, path and URL computation,
//! cloning, version snapshots and read authorization.

pub mod clone;
pub mod import;
pub mod item;
pub mod ordering;
pub mod path;
pub mod security;
pub mod tree;

pub use import::ItemSpec;
pub use item::{AttributeValue, ContentItem, ContentState, Field, ItemKind};
pub use security::{AuthorizedRole, Permission, Principal, EVERYONE};
pub use tree::ContentTree;
