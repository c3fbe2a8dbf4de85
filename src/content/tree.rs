//! Content tree arena
//!
//! Owns every item and keeps the two sides of each parent/child link in step.
//! Items are addressed by [`NodeRef`] handles; the persisted [`ItemId`] is
//! indexed separately because transient items live in the arena too.

use crate::content::item::{AttributeValue, ContentItem, Field, ItemKind};
use crate::content::ordering::{self, compare_sort_order};
use crate::content::security::{AuthorizedRole, Permission};
use crate::error::ContentError;
use crate::types::{ItemId, NodeRef, TRANSIENT_ID};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Arena holding a forest of content items
#[derive(Debug, Clone, Default)]
pub struct ContentTree {
    slots: Vec<Option<ContentItem>>,
    by_id: HashMap<ItemId, NodeRef>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached item to the arena.
    ///
    /// Hierarchy fields of `item` are cleared; use [`attach`](Self::attach)
    /// to place it. Fails when another item already holds the same id.
    pub fn insert(&mut self, mut item: ContentItem) -> Result<NodeRef, ContentError> {
        if item.id != TRANSIENT_ID && self.by_id.contains_key(&item.id) {
            return Err(ContentError::InvalidArgument(format!(
                "item id {} is already present in the tree",
                item.id
            )));
        }
        let node = NodeRef(self.slots.len());
        item.parent = None;
        item.children.clear();
        item.ancestral_trail = "/".to_string();
        item.url_cache = None;
        for role in item.authorized_roles.iter_mut() {
            role.item = Some(node);
        }
        if item.id != TRANSIENT_ID {
            self.by_id.insert(item.id, node);
        }
        self.slots.push(Some(item));
        Ok(node)
    }

    /// Create and insert a transient item of `kind` named `name`
    pub fn create(&mut self, kind: ItemKind, name: &str) -> NodeRef {
        let node = NodeRef(self.slots.len());
        self.slots.push(Some(ContentItem::new(kind, name)));
        node
    }

    pub fn get(&self, node: NodeRef) -> Option<&ContentItem> {
        self.slots.get(node.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut ContentItem> {
        self.slots.get_mut(node.0).and_then(Option::as_mut)
    }

    pub fn item(&self, node: NodeRef) -> Result<&ContentItem, ContentError> {
        self.get(node).ok_or(ContentError::NodeNotFound(node))
    }

    pub fn item_mut(&mut self, node: NodeRef) -> Result<&mut ContentItem, ContentError> {
        self.get_mut(node).ok_or(ContentError::NodeNotFound(node))
    }

    pub fn contains(&self, node: NodeRef) -> bool {
        self.get(node).is_some()
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &ContentItem)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (NodeRef(i), item)))
    }

    /// Items without a parent that are not version snapshots
    pub fn roots(&self) -> Vec<NodeRef> {
        self.iter()
            .filter(|(_, item)| item.parent.is_none() && item.version_of.is_none())
            .map(|(node, _)| node)
            .collect()
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<NodeRef> {
        if id == TRANSIENT_ID {
            return None;
        }
        self.by_id.get(&id).copied()
    }

    /// Like [`find_by_id`](Self::find_by_id), but a missing id is an error
    pub fn node_for_id(&self, id: ItemId) -> Result<NodeRef, ContentError> {
        self.find_by_id(id).ok_or(ContentError::ItemNotFound(id))
    }

    /// Assign the persisted id of an item, keeping the id index current
    pub fn set_id(&mut self, node: NodeRef, id: ItemId) -> Result<(), ContentError> {
        if let Some(existing) = self.find_by_id(id) {
            if existing != node {
                return Err(ContentError::InvalidArgument(format!(
                    "item id {} is already assigned to {}",
                    id, existing
                )));
            }
        }
        let item = self.item_mut(node)?;
        let previous = std::mem::replace(&mut item.id, id);
        if previous != TRANSIENT_ID {
            self.by_id.remove(&previous);
        }
        if id != TRANSIENT_ID {
            self.by_id.insert(id, node);
        }
        self.refresh_trails(node)?;
        // Unnamed paths and part URLs embed the id.
        self.invalidate_urls(node);
        Ok(())
    }

    /// Identity comparison: the same handle, or the same non-zero persisted id
    pub fn same_item(&self, a: NodeRef, b: NodeRef) -> bool {
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.get(node).and_then(|item| item.parent)
    }

    /// The item whose children and path a node presents: its master for a
    /// version snapshot, otherwise the node itself
    pub fn canonical(&self, node: NodeRef) -> NodeRef {
        self.get(node)
            .and_then(|item| item.version_of)
            .filter(|master| self.contains(*master))
            .unwrap_or(node)
    }

    /// Children of the canonical item, unfiltered, in stored order
    pub fn structural_children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.get(self.canonical(node))
            .map(|item| item.children.clone())
            .unwrap_or_default()
    }

    /// Ancestors from the parent up to the root.
    ///
    /// Stops early, with a warning, if the parent chain loops.
    pub fn ancestors(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut result = Vec::new();
        let mut visited = HashSet::from([node]);
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if !visited.insert(parent) {
                warn!(node = %node, at = %parent, "Parent chain contains a cycle");
                break;
            }
            result.push(parent);
            current = self.parent(parent);
        }
        result
    }

    /// Whether `ancestor` appears on the parent chain of `node`
    pub fn is_ancestor_of(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// Pre-order walk of `node` and everything below it
    pub fn descendants_and_self(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut result = Vec::new();
        let mut stack = vec![node];
        let mut visited = HashSet::new();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(item) = self.get(current) else {
                continue;
            };
            result.push(current);
            stack.extend(item.children.iter().rev().copied());
        }
        result
    }

    /// Move `node` under `new_parent`, or make it a root when `None`.
    ///
    /// The node is removed from its previous parent first. Among the new
    /// siblings it is placed by [`ordering::insertion_index`]. Re-attaching to
    /// the current parent keeps the node where it is. A version snapshot as
    /// parent stands for its master.
    pub fn attach(&mut self, node: NodeRef, new_parent: Option<NodeRef>) -> Result<(), ContentError> {
        let new_parent = new_parent.map(|p| self.canonical(p));
        let old_parent = self.item(node)?.parent;
        if let Some(parent) = new_parent {
            self.check_parent(node, parent)?;
        }

        if old_parent != new_parent {
            if let Some(old) = old_parent {
                self.unlink_child(old, node);
            }
        }
        self.item_mut(node)?.parent = new_parent;

        if let Some(parent) = new_parent {
            let siblings = &self.item(parent)?.children;
            if !siblings.contains(&node) {
                let orders: Vec<i32> = siblings
                    .iter()
                    .filter_map(|s| self.get(*s).map(|i| i.sort_order))
                    .collect();
                let index = ordering::insertion_index(&orders);
                self.item_mut(parent)?.children.insert(index, node);
                debug!(node = %node, parent = %parent, index, "Attached item");
            }
        } else if old_parent.is_some() {
            debug!(node = %node, "Detached item");
        }

        self.refresh_trails(node)?;
        self.invalidate_urls(node);
        Ok(())
    }

    /// Detach `node` from its parent, leaving it as a root
    pub fn detach(&mut self, node: NodeRef) -> Result<(), ContentError> {
        self.attach(node, None)
    }

    /// Insert `node` at a specific position among the children of `parent`,
    /// then renumber siblings so sort orders follow positions.
    ///
    /// Returns the siblings whose sort order changed.
    pub fn insert_at(
        &mut self,
        node: NodeRef,
        parent: NodeRef,
        index: usize,
    ) -> Result<Vec<NodeRef>, ContentError> {
        self.item(node)?;
        let parent = self.canonical(parent);
        self.check_parent(node, parent)?;
        if let Some(old) = self.item(node)?.parent {
            self.unlink_child(old, node);
        }
        self.item_mut(node)?.parent = Some(parent);
        let children = &mut self.item_mut(parent)?.children;
        let index = index.min(children.len());
        children.insert(index, node);
        debug!(node = %node, parent = %parent, index, "Inserted item at index");

        self.refresh_trails(node)?;
        self.invalidate_urls(node);
        self.update_sort_order(parent)
    }

    /// Move `node` to `index` within its current parent
    pub fn move_to_index(&mut self, node: NodeRef, index: usize) -> Result<Vec<NodeRef>, ContentError> {
        let parent = self.item(node)?.parent.ok_or_else(|| {
            ContentError::InvalidOperation(format!("{} has no parent to reorder within", node))
        })?;
        self.insert_at(node, parent, index)
    }

    /// Renumber the children of `parent` so sort orders strictly increase in
    /// stored order. Returns the children whose sort order changed.
    pub fn update_sort_order(&mut self, parent: NodeRef) -> Result<Vec<NodeRef>, ContentError> {
        let children = self.item(parent)?.children.clone();
        let mut orders: Vec<i32> = children
            .iter()
            .map(|c| self.item(*c).map(|i| i.sort_order))
            .collect::<Result<_, _>>()?;
        let changed: Vec<NodeRef> = ordering::normalize_sort_orders(&mut orders)
            .into_iter()
            .map(|i| children[i])
            .collect();
        for (child, order) in children.iter().zip(orders) {
            self.item_mut(*child)?.sort_order = order;
        }
        Ok(changed)
    }

    /// Stable sort of the children of `parent` by sort order
    pub fn sort_children(&mut self, parent: NodeRef) -> Result<(), ContentError> {
        let mut children = self.item(parent)?.children.clone();
        children.sort_by(|a, b| {
            let a = self.get(*a).map_or(0, |i| i.sort_order);
            let b = self.get(*b).map_or(0, |i| i.sort_order);
            compare_sort_order(a, b)
        });
        self.item_mut(parent)?.children = children;
        Ok(())
    }

    /// Detach `node` and drop it and its subtree from the arena.
    ///
    /// Returns the number of items removed.
    pub fn remove(&mut self, node: NodeRef) -> Result<usize, ContentError> {
        self.detach(node)?;
        let doomed = self.descendants_and_self(node);
        for current in &doomed {
            if let Some(item) = self.slots[current.0].take() {
                if item.id != TRANSIENT_ID {
                    self.by_id.remove(&item.id);
                }
            }
        }
        debug!(node = %node, removed = doomed.len(), "Removed subtree");
        Ok(doomed.len())
    }

    /// Rename an item, invalidating cached URLs below it
    pub fn set_name(&mut self, node: NodeRef, name: &str) -> Result<(), ContentError> {
        self.item_mut(node)?.set_name(Some(name.to_string()));
        self.invalidate_urls(node);
        Ok(())
    }

    /// Write a named attribute of `node`.
    ///
    /// Schema fields of the item's kind are type-checked and assigned; other
    /// names go to the detail bag, where `Null` removes the entry. Assigning
    /// a collection is an `InvalidOperation`. Renaming clears cached URLs of
    /// the subtree.
    pub fn set_attribute(
        &mut self,
        node: NodeRef,
        name: &str,
        value: AttributeValue,
    ) -> Result<(), ContentError> {
        let field = self.item_mut(node)?.set_attribute(name, value)?;
        if field == Some(Field::Name) {
            self.invalidate_urls(node);
        }
        Ok(())
    }

    /// Restrict read access of `node` to `role` (in addition to existing rules)
    pub fn add_authorized_role(&mut self, node: NodeRef, role: &str) -> Result<(), ContentError> {
        if role.is_empty() {
            return Err(ContentError::InvalidArgument(
                "role name cannot be empty".to_string(),
            ));
        }
        let item = self.item_mut(node)?;
        if !item.authorized_roles.iter().any(|r| r.role == role) {
            let mut rule = AuthorizedRole::new(role);
            rule.item = Some(node);
            item.authorized_roles.push(rule);
        }
        item.altered_permissions |= Permission::READ;
        Ok(())
    }

    /// Drop all role rules of `node`, reopening read access
    pub fn clear_authorized_roles(&mut self, node: NodeRef) -> Result<(), ContentError> {
        let item = self.item_mut(node)?;
        item.authorized_roles.clear();
        item.altered_permissions.remove(Permission::READ);
        Ok(())
    }

    fn check_parent(&self, node: NodeRef, parent: NodeRef) -> Result<(), ContentError> {
        self.item(parent)?;
        if parent == node || self.is_ancestor_of(node, parent) {
            return Err(ContentError::InvalidOperation(format!(
                "cannot attach {} beneath itself",
                node
            )));
        }
        Ok(())
    }

    fn unlink_child(&mut self, parent: NodeRef, child: NodeRef) {
        if let Some(item) = self.get_mut(parent) {
            item.children.retain(|c| *c != child);
        }
    }

    /// Recompute ancestral trails for `node` and its subtree
    fn refresh_trails(&mut self, node: NodeRef) -> Result<(), ContentError> {
        let trail = match self.item(node)?.parent {
            Some(parent) => {
                let parent = self.item(parent)?;
                format!("{}{}/", parent.ancestral_trail, parent.id)
            }
            None => "/".to_string(),
        };
        self.item_mut(node)?.ancestral_trail = trail;

        for current in self.descendants_and_self(node).into_iter().skip(1) {
            let Some(parent) = self.parent(current) else {
                continue;
            };
            let trail = {
                let parent = self.item(parent)?;
                format!("{}{}/", parent.ancestral_trail, parent.id)
            };
            self.item_mut(current)?.ancestral_trail = trail;
        }
        Ok(())
    }

    /// Clear cached URLs of `node`, its descendants and their version snapshots
    pub(crate) fn invalidate_urls(&mut self, node: NodeRef) {
        let affected: HashSet<NodeRef> = self.descendants_and_self(node).into_iter().collect();
        for item in self.slots.iter_mut().flatten() {
            let snapshot_of_affected = item.version_of.is_some_and(|m| affected.contains(&m));
            if snapshot_of_affected {
                item.url_cache = None;
            }
        }
        for current in affected {
            if let Some(item) = self.get_mut(current) {
                item.url_cache = None;
            }
        }
    }
}
