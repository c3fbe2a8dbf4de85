//! Child Filter Pipeline
//!
//! Predicates applied when enumerating the children of an item. Filters
//! compose by conjunction through [`CompositeFilter`] or [`ItemFilter::and`].

use crate::content::{ContentItem, ContentTree, ItemKind, Principal};
use crate::error::ContentError;
use crate::types::NodeRef;
use chrono::{DateTime, Utc};

/// Predicate deciding whether an item is included in an enumeration
pub trait ItemFilter {
    fn matches(&self, item: &ContentItem) -> bool;

    /// Keep the entries of `nodes` that pass this filter, in order
    fn filter(&self, tree: &ContentTree, nodes: &[NodeRef]) -> Vec<NodeRef> {
        nodes
            .iter()
            .copied()
            .filter(|n| tree.get(*n).map_or(false, |item| self.matches(item)))
            .collect()
    }

    /// Conjunction of this filter and `other`
    fn and<F>(self, other: F) -> CompositeFilter
    where
        Self: Sized + 'static,
        F: ItemFilter + 'static,
    {
        CompositeFilter::new(vec![Box::new(self), Box::new(other)])
    }
}

/// Passes everything. Used for structural walks such as path resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFilter;

impl ItemFilter for AllFilter {
    fn matches(&self, _item: &ContentItem) -> bool {
        true
    }
}

/// Passes items the principal may read
#[derive(Debug, Clone)]
pub struct AccessFilter {
    principal: Principal,
}

impl AccessFilter {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}

impl ItemFilter for AccessFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        item.is_authorized(&self.principal)
    }
}

/// Passes items placed in a zone; `None` selects items outside any zone
#[derive(Debug, Clone)]
pub struct ZoneFilter {
    zone: Option<String>,
}

impl ZoneFilter {
    pub fn new(zone: Option<&str>) -> Self {
        Self {
            zone: zone.map(str::to_string),
        }
    }
}

impl ItemFilter for ZoneFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        item.zone_name == self.zone
    }
}

/// Passes items of the listed kinds
#[derive(Debug, Clone)]
pub struct KindFilter {
    kinds: Vec<ItemKind>,
}

impl KindFilter {
    pub fn new(kinds: &[ItemKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
        }
    }
}

impl ItemFilter for KindFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        self.kinds.contains(&item.kind)
    }
}

/// Passes pages, or with `PageFilter::parts()` everything that is not a page
#[derive(Debug, Clone, Copy)]
pub struct PageFilter {
    pages: bool,
}

impl PageFilter {
    pub fn pages() -> Self {
        Self { pages: true }
    }

    pub fn parts() -> Self {
        Self { pages: false }
    }
}

impl ItemFilter for PageFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        item.is_page() == self.pages
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VisibleFilter;

impl ItemFilter for VisibleFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        item.visible
    }
}

/// Passes items whose publication window contains a point in time
#[derive(Debug, Clone, Copy)]
pub struct PublishedFilter {
    at: DateTime<Utc>,
}

impl PublishedFilter {
    pub fn now() -> Self {
        Self { at: Utc::now() }
    }

    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl ItemFilter for PublishedFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        item.is_published_at(self.at)
    }
}

/// Negates another filter
pub struct InverseFilter {
    inner: Box<dyn ItemFilter>,
}

impl InverseFilter {
    pub fn new(inner: impl ItemFilter + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl ItemFilter for InverseFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        !self.inner.matches(item)
    }
}

/// Passes items accepted by every member filter
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn ItemFilter>>,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Box<dyn ItemFilter>>) -> Self {
        Self { filters }
    }

    pub fn push(&mut self, filter: impl ItemFilter + 'static) {
        self.filters.push(Box::new(filter));
    }
}

impl ItemFilter for CompositeFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    fn and<F>(mut self, other: F) -> CompositeFilter
    where
        Self: Sized + 'static,
        F: ItemFilter + 'static,
    {
        self.filters.push(Box::new(other));
        self
    }
}

impl ContentTree {
    /// Children of `node` that `principal` may read.
    ///
    /// Version snapshots enumerate the children of their master.
    pub fn children(&self, node: NodeRef, principal: &Principal) -> Result<Vec<NodeRef>, ContentError> {
        self.children_filtered(node, &AccessFilter::new(principal.clone()))
    }

    /// Readable children of `node` placed in `zone`
    pub fn children_in_zone(
        &self,
        node: NodeRef,
        zone: Option<&str>,
        principal: &Principal,
    ) -> Result<Vec<NodeRef>, ContentError> {
        let filter = ZoneFilter::new(zone).and(AccessFilter::new(principal.clone()));
        self.children_filtered(node, &filter)
    }

    /// Children of `node` passing `filter`
    pub fn children_filtered(
        &self,
        node: NodeRef,
        filter: &dyn ItemFilter,
    ) -> Result<Vec<NodeRef>, ContentError> {
        self.item(node)?;
        Ok(filter.filter(self, &self.structural_children(node)))
    }
}
