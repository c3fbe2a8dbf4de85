//! Path Resolver
//!
//! Maps URL paths onto the content tree. A walk matches one segment per level
//! and stops at the deepest item it can reach; whatever is left of the path is
//! handed back to the caller as action and argument data.

use crate::content::path::{normalize_segment, segment_matches};
use crate::content::ContentTree;
use crate::filter::{AllFilter, ItemFilter};
use crate::host::{RequestContext, SiteRegistry};
use crate::types::NodeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

/// Action reported when the path was fully consumed
pub const DEFAULT_ACTION: &str = "default";

/// Outcome of resolving a path against the tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathResult {
    /// Deepest item reached; `None` when nothing resolved
    pub item: Option<NodeRef>,
    /// Unmatched remainder of the path, without surrounding slashes
    pub remaining: String,
    /// Decoded query string parameters
    pub query: BTreeMap<String, String>,
}

impl PathResult {
    /// Result signalling that no item was resolved
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bound(item: NodeRef, remaining: impl Into<String>) -> Self {
        Self {
            item: Some(item),
            remaining: remaining.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Whether the whole path matched items
    pub fn is_exact(&self) -> bool {
        self.item.is_some() && self.remaining.is_empty()
    }

    /// First unmatched segment, or [`DEFAULT_ACTION`]
    pub fn action(&self) -> &str {
        match self.remaining.split('/').next() {
            Some(segment) if !segment.is_empty() => segment,
            _ => DEFAULT_ACTION,
        }
    }

    /// Unmatched segments after the action
    pub fn argument(&self) -> &str {
        self.remaining
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or("")
    }

    fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }
}

/// Split `path?query` and decode the query into key/value pairs
fn split_query(path: &str) -> (&str, BTreeMap<String, String>) {
    let Some((path, query)) = path.split_once('?') else {
        return (path, BTreeMap::new());
    };
    let decode = |s: &str| {
        let s = s.replace('+', " ");
        match urlencoding::decode(&s) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => s.clone(),
        }
    };
    let params = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(pair), String::new()),
        })
        .collect();
    (path, params)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Child of `node` addressed by one raw URL segment
fn match_child(
    tree: &ContentTree,
    node: NodeRef,
    segment: &str,
    extension: &str,
    filter: &dyn ItemFilter,
) -> Option<NodeRef> {
    let wanted = normalize_segment(segment);
    let children = filter.filter(tree, &tree.structural_children(node));
    children.into_iter().find(|child| {
        tree.get(*child)
            .map_or(false, |item| segment_matches(&item.name_or_id(), &wanted, extension))
    })
}

/// Resolve `path` starting at `start`.
///
/// Segments are matched left to right against child names (or names plus
/// `extension`), case-insensitively and without access filtering. The result
/// is bound to the deepest item reached with the unmatched remainder kept.
#[instrument(skip(tree, start), fields(start = %start))]
pub fn resolve_path(tree: &ContentTree, start: NodeRef, path: &str, extension: &str) -> PathResult {
    if !tree.contains(start) {
        debug!("Start item is not in the tree");
        return PathResult::empty();
    }
    let (path, query) = split_query(path);
    let parts = segments(path);

    let mut current = start;
    for (depth, segment) in parts.iter().enumerate() {
        match match_child(tree, current, segment, extension, &AllFilter) {
            Some(child) => {
                trace!(segment, child = %child, "Matched segment");
                current = child;
            }
            None => {
                let remaining = parts[depth..].join("/");
                debug!(item = %current, remaining = %remaining, "Path partially resolved");
                return PathResult::bound(current, remaining).with_query(query);
            }
        }
    }
    PathResult::bound(current, "").with_query(query)
}

/// Look up a descendant of `node` by name or slash-delimited path.
///
/// An empty path or a lone `/` refers to `node` itself; a leading slash is
/// relative to `node`. Returns `None` unless every segment matches.
pub fn get_child(tree: &ContentTree, node: NodeRef, path: &str, extension: &str) -> Option<NodeRef> {
    tree.get(node)?;
    let mut current = node;
    for segment in segments(path) {
        current = match_child(tree, current, segment, extension, &AllFilter)?;
    }
    Some(current)
}

/// Resolve a request path against the start page of the request's site.
///
/// Returns an empty result when the site's start page is not in the tree.
pub fn resolve_url(
    tree: &ContentTree,
    registry: &SiteRegistry,
    request: &RequestContext,
    path: &str,
    extension: &str,
) -> PathResult {
    let site = registry.current_site(request);
    match tree.find_by_id(site.start_page_id) {
        Some(start) => resolve_path(tree, start, path, extension),
        None => {
            debug!(
                site = %site.name,
                start_page = site.start_page_id,
                "Start page of site is not in the tree"
            );
            PathResult::empty()
        }
    }
}
