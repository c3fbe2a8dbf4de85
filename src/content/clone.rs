//! Cloning, in-place update and version snapshots.

use crate::content::item::ContentState;
use crate::content::tree::ContentTree;
use crate::error::ContentError;
use crate::types::NodeRef;
use chrono::Utc;
use tracing::{debug, info};

impl ContentTree {
    /// Copy an item into a new, detached, transient item.
    ///
    /// The copy shares no containers with the source: details, collections
    /// and role rules are deep-copied, roles are rebound to the copy. With
    /// `include_children` the subtree is copied as well and attached to the
    /// copy in the original order.
    pub fn clone_item(&mut self, node: NodeRef, include_children: bool) -> Result<NodeRef, ContentError> {
        let copy = self.item(node)?.detached_copy();
        let cloned = self.insert(copy)?;

        if include_children {
            for child in self.item(node)?.child_refs().to_vec() {
                let child_copy = self.clone_item(child, true)?;
                let position = self.item(cloned)?.child_refs().len();
                self.item_mut(child_copy)?.parent = Some(cloned);
                self.item_mut(cloned)?.children.insert(position, child_copy);
            }
            self.refresh_subtree(cloned)?;
        }
        debug!(source = %node, clone = %cloned, include_children, "Cloned item");
        Ok(cloned)
    }

    /// Overwrite the content of `destination` with that of `source`.
    ///
    /// Scalar fields, details, detail collections and role rules are copied;
    /// details and collections missing from `source` are removed. Identity,
    /// kind, hierarchy and version linkage of `destination` are untouched.
    pub fn update_from(&mut self, destination: NodeRef, source: NodeRef) -> Result<(), ContentError> {
        if destination == source {
            return Ok(());
        }
        let source_item = self.item(source)?.clone();
        let renamed = self.item(destination)?.name() != source_item.name();

        let item = self.item_mut(destination)?;
        item.title = source_item.title.clone();
        item.set_name(source_item.name().map(str::to_string));
        item.zone_name = source_item.zone_name.clone();
        item.sort_order = source_item.sort_order;
        item.visible = source_item.visible;
        item.state = source_item.state;
        item.saved_by = source_item.saved_by.clone();
        item.created = source_item.created;
        item.updated = source_item.updated;
        item.published = source_item.published;
        item.expires = source_item.expires;
        item.altered_permissions = source_item.altered_permissions;
        item.details.sync_from(&source_item.details)?;
        item.authorized_roles = source_item
            .authorized_roles()
            .iter()
            .map(|r| r.rebound_to(Some(destination)))
            .collect();

        if renamed {
            self.invalidate_urls(destination);
        }
        Ok(())
    }

    /// Store a snapshot of `master` as a new version.
    ///
    /// The snapshot is detached, points back at `master` and takes the
    /// master's current version index; the master's index then advances.
    pub fn create_version(&mut self, master: NodeRef) -> Result<NodeRef, ContentError> {
        let master = self.canonical(master);
        let mut copy = self.item(master)?.detached_copy();
        let index = self.item(master)?.version_index;
        copy.version_of = Some(master);
        copy.version_index = index;
        let version = self.insert(copy)?;
        self.item_mut(master)?.version_index = index.saturating_add(1);
        debug!(master = %master, version = %version, index, "Created version");
        Ok(version)
    }

    /// Versions of `master`, newest first
    pub fn versions_of(&self, master: NodeRef) -> Vec<NodeRef> {
        let mut versions: Vec<(i32, NodeRef)> = self
            .iter()
            .filter(|(_, item)| item.version_of() == Some(master))
            .map(|(node, item)| (item.version_index, node))
            .collect();
        versions.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        versions.into_iter().map(|(_, node)| node).collect()
    }

    /// Copy a version snapshot back over its master and mark it published.
    ///
    /// Returns the master.
    pub fn publish_version(&mut self, version: NodeRef) -> Result<NodeRef, ContentError> {
        let master = self.item(version)?.version_of().ok_or_else(|| {
            ContentError::InvalidOperation(format!("{} is not a version", version))
        })?;
        self.update_from(master, version)?;
        let item = self.item_mut(master)?;
        item.state = ContentState::Published;
        if item.published.is_none() {
            item.published = Some(Utc::now());
        }
        info!(master = %master, version = %version, "Published version");
        Ok(master)
    }

    fn refresh_subtree(&mut self, node: NodeRef) -> Result<(), ContentError> {
        // Re-attaching to the current parent keeps positions and rebuilds trails.
        let parent = self.parent(node);
        self.attach(node, parent)
    }
}
