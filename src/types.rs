//! Core identifier types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted item identifier. Zero marks an unsaved (transient) item.
pub type ItemId = i32;

/// Identifier value carried by items that have never been saved
pub const TRANSIENT_ID: ItemId = 0;

/// Stable handle to an item slot inside a [`ContentTree`](crate::content::ContentTree).
///
/// Handles are never reused, so a handle to a removed item stays dangling
/// rather than silently aliasing a newer item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
