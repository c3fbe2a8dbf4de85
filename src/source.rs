//! Content sources: the collaborators that supply and persist items.
//!
//! A [`SourceRegistry`] orders sources by declared priority and hands each
//! call to the first source that provides the item in question.

use crate::content::{ContentTree, ItemKind, Principal};
use crate::error::ContentError;
use crate::filter::{AccessFilter, CompositeFilter, PageFilter, ZoneFilter};
use crate::resolve::{self, PathResult};
use crate::types::{ItemId, NodeRef, TRANSIENT_ID};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Precedence values for sources. Lower values are consulted first.
pub struct SourcePriority;

impl SourcePriority {
    /// Source bound to one concrete kind of item
    pub const SPECIFIC_KIND: i32 = 100;
    /// Source bound to a capability shared by several kinds
    pub const CAPABILITY: i32 = 150;
    /// Catch-all source
    pub const FALLBACK: i32 = 200;
}

/// What to enumerate in [`ContentSource::append_children`]
#[derive(Debug, Clone)]
pub struct ChildQuery {
    pub parent: NodeRef,
    pub zone: Option<String>,
    pub principal: Option<Principal>,
    pub pages_only: bool,
}

impl ChildQuery {
    pub fn new(parent: NodeRef) -> Self {
        Self {
            parent,
            zone: None,
            principal: None,
            pages_only: false,
        }
    }

    pub fn in_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn for_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn pages(mut self) -> Self {
        self.pages_only = true;
        self
    }

    fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::default();
        if let Some(zone) = &self.zone {
            filter.push(ZoneFilter::new(Some(zone.as_str())));
        }
        if let Some(principal) = &self.principal {
            filter.push(AccessFilter::new(principal.clone()));
        }
        if self.pages_only {
            filter.push(PageFilter::pages());
        }
        filter
    }
}

/// Supplier and persister of content items
pub trait ContentSource: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> i32 {
        SourcePriority::FALLBACK
    }

    /// Whether this source is responsible for `node`
    fn is_provided_by(&self, tree: &ContentTree, node: NodeRef) -> bool;

    fn get(&self, tree: &ContentTree, id: ItemId) -> Option<NodeRef>;

    /// Persist `node`, assigning an id when it is transient
    fn save(&self, tree: &mut ContentTree, node: NodeRef) -> Result<ItemId, ContentError>;

    fn delete(&self, tree: &mut ContentTree, node: NodeRef) -> Result<(), ContentError>;

    fn move_to(
        &self,
        tree: &mut ContentTree,
        node: NodeRef,
        destination: NodeRef,
    ) -> Result<NodeRef, ContentError>;

    fn copy_to(
        &self,
        tree: &mut ContentTree,
        node: NodeRef,
        destination: NodeRef,
    ) -> Result<NodeRef, ContentError>;

    /// Extend `previous` with the children this source contributes
    fn append_children(
        &self,
        tree: &ContentTree,
        previous: Vec<NodeRef>,
        query: &ChildQuery,
    ) -> Result<Vec<NodeRef>, ContentError>;

    fn resolve_path(&self, tree: &ContentTree, start: NodeRef, path: &str) -> PathResult;
}

struct Registration {
    priority: i32,
    order: usize,
    source: Box<dyn ContentSource>,
}

/// Ordered set of sources with per-item dispatch
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Registration>,
    registered: usize,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source. Ties in priority keep registration order.
    pub fn register(&mut self, source: Box<dyn ContentSource>) {
        let registration = Registration {
            priority: source.priority(),
            order: self.registered,
            source,
        };
        debug!(
            source = registration.source.name(),
            priority = registration.priority,
            "Registered content source"
        );
        self.registered += 1;
        self.sources.push(registration);
        self.sources.sort_by_key(|r| (r.priority, r.order));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source names in consultation order
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|r| r.source.name()).collect()
    }

    /// First source responsible for `node`
    pub fn provider_for(
        &self,
        tree: &ContentTree,
        node: NodeRef,
    ) -> Result<&dyn ContentSource, ContentError> {
        tree.item(node)?;
        self.sources
            .iter()
            .map(|r| r.source.as_ref())
            .find(|source| source.is_provided_by(tree, node))
            .ok_or(ContentError::NoSource(node))
    }

    pub fn get(&self, tree: &ContentTree, id: ItemId) -> Option<NodeRef> {
        self.sources.iter().find_map(|r| r.source.get(tree, id))
    }

    pub fn save(&self, tree: &mut ContentTree, node: NodeRef) -> Result<ItemId, ContentError> {
        self.provider_for(tree, node)?.save(tree, node)
    }

    pub fn delete(&self, tree: &mut ContentTree, node: NodeRef) -> Result<(), ContentError> {
        self.provider_for(tree, node)?.delete(tree, node)
    }

    pub fn move_to(
        &self,
        tree: &mut ContentTree,
        node: NodeRef,
        destination: NodeRef,
    ) -> Result<NodeRef, ContentError> {
        self.provider_for(tree, node)?.move_to(tree, node, destination)
    }

    pub fn copy_to(
        &self,
        tree: &mut ContentTree,
        node: NodeRef,
        destination: NodeRef,
    ) -> Result<NodeRef, ContentError> {
        self.provider_for(tree, node)?.copy_to(tree, node, destination)
    }

    /// Children contributed by every source, in source order
    pub fn children(
        &self,
        tree: &ContentTree,
        query: &ChildQuery,
    ) -> Result<Vec<NodeRef>, ContentError> {
        self.sources
            .iter()
            .try_fold(Vec::new(), |previous, r| {
                r.source.append_children(tree, previous, query)
            })
    }

    /// First non-empty resolution among the sources
    pub fn resolve_path(&self, tree: &ContentTree, start: NodeRef, path: &str) -> PathResult {
        self.sources
            .iter()
            .map(|r| r.source.resolve_path(tree, start, path))
            .find(|result| !result.is_empty())
            .unwrap_or_else(PathResult::empty)
    }
}

/// In-memory source backed directly by the tree
pub struct TreeSource {
    name: String,
    priority: i32,
    kinds: Option<Vec<ItemKind>>,
    extension: String,
    next_id: Mutex<ItemId>,
}

impl TreeSource {
    /// Source for every kind of item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: SourcePriority::FALLBACK,
            kinds: None,
            extension: String::new(),
            next_id: Mutex::new(1),
        }
    }

    /// Restrict the source to `kinds`. One kind counts as specific, several
    /// as a capability.
    pub fn for_kinds(mut self, kinds: &[ItemKind]) -> Self {
        self.priority = if kinds.len() == 1 {
            SourcePriority::SPECIFIC_KIND
        } else {
            SourcePriority::CAPABILITY
        };
        self.kinds = Some(kinds.to_vec());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    fn allocate_id(&self, tree: &ContentTree) -> ItemId {
        let mut next = self.next_id.lock();
        while tree.find_by_id(*next).is_some() {
            *next += 1;
        }
        let id = *next;
        *next += 1;
        id
    }

    fn save_subtree(&self, tree: &mut ContentTree, node: NodeRef) -> Result<(), ContentError> {
        for current in tree.descendants_and_self(node) {
            if tree.item(current)?.is_transient() {
                let id = self.allocate_id(tree);
                tree.set_id(current, id)?;
            }
        }
        Ok(())
    }
}

impl ContentSource for TreeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_provided_by(&self, tree: &ContentTree, node: NodeRef) -> bool {
        match (&self.kinds, tree.get(node)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(kinds), Some(item)) => kinds.contains(&item.kind),
        }
    }

    fn get(&self, tree: &ContentTree, id: ItemId) -> Option<NodeRef> {
        tree.find_by_id(id)
            .filter(|node| self.is_provided_by(tree, *node))
    }

    fn save(&self, tree: &mut ContentTree, node: NodeRef) -> Result<ItemId, ContentError> {
        let item = tree.item(node)?;
        if item.id != TRANSIENT_ID {
            return Ok(item.id);
        }
        let id = self.allocate_id(tree);
        tree.set_id(node, id)?;
        tree.item_mut(node)?.updated = chrono::Utc::now();
        debug!(source = %self.name, node = %node, id, "Saved item");
        Ok(id)
    }

    fn delete(&self, tree: &mut ContentTree, node: NodeRef) -> Result<(), ContentError> {
        let removed = tree.remove(node)?;
        debug!(source = %self.name, node = %node, removed, "Deleted item");
        Ok(())
    }

    fn move_to(
        &self,
        tree: &mut ContentTree,
        node: NodeRef,
        destination: NodeRef,
    ) -> Result<NodeRef, ContentError> {
        tree.attach(node, Some(destination))?;
        Ok(node)
    }

    fn copy_to(
        &self,
        tree: &mut ContentTree,
        node: NodeRef,
        destination: NodeRef,
    ) -> Result<NodeRef, ContentError> {
        tree.item(destination)?;
        let copy = tree.clone_item(node, true)?;
        tree.attach(copy, Some(destination))?;
        self.save_subtree(tree, copy)?;
        Ok(copy)
    }

    fn append_children(
        &self,
        tree: &ContentTree,
        mut previous: Vec<NodeRef>,
        query: &ChildQuery,
    ) -> Result<Vec<NodeRef>, ContentError> {
        let filter = query.to_filter();
        for child in tree.children_filtered(query.parent, &filter)? {
            if self.is_provided_by(tree, child) && !previous.contains(&child) {
                previous.push(child);
            }
        }
        Ok(previous)
    }

    fn resolve_path(&self, tree: &ContentTree, start: NodeRef, path: &str) -> PathResult {
        if !tree.contains(start) {
            warn!(source = %self.name, start = %start, "Path resolution from a missing item");
            return PathResult::empty();
        }
        let result = resolve::resolve_path(tree, start, path, &self.extension);
        match result.item {
            Some(item) if self.is_provided_by(tree, item) => result,
            _ => PathResult::empty(),
        }
    }
}
