//! Loading trees from nested JSON item documents.

use crate::content::item::{ContentItem, ContentState, ItemKind};
use crate::content::tree::ContentTree;
use crate::details::DetailValue;
use crate::error::ContentError;
use crate::types::{ItemId, NodeRef, TRANSIENT_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Serialized form of an item and its subtree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSpec {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub state: Option<ContentState>,
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<serde_json::Value>>,
    /// Roles allowed to read; empty leaves the item open
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub children: Vec<ItemSpec>,
}

fn default_visible() -> bool {
    true
}

impl ContentTree {
    /// Build a tree from a JSON document describing its root item
    pub fn from_json(json: &str) -> Result<(ContentTree, NodeRef), ContentError> {
        let spec: ItemSpec = serde_json::from_str(json)?;
        let mut tree = ContentTree::new();
        let root = tree.import(&spec, None)?;
        info!(items = tree.len(), "Imported content tree");
        Ok((tree, root))
    }

    pub fn from_json_file(path: &Path) -> Result<(ContentTree, NodeRef), ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Insert `spec` and its children beneath `parent`
    pub fn import(&mut self, spec: &ItemSpec, parent: Option<NodeRef>) -> Result<NodeRef, ContentError> {
        let mut item = ContentItem::new(spec.kind, spec.name.as_str());
        item.id = spec.id;
        if let Some(title) = &spec.title {
            item.title = title.clone();
        }
        item.zone_name = spec.zone.clone();
        item.sort_order = spec.sort_order.unwrap_or(0);
        item.visible = spec.visible;
        item.state = spec.state.unwrap_or(ContentState::Published);
        for (key, value) in &spec.details {
            if let Some(value) = DetailValue::from_json(value.clone()) {
                item.details.set(key, value)?;
            }
        }
        for (name, values) in &spec.collections {
            if let Some(collection) = item.details.get_or_create_collection(name, true)? {
                for value in values.iter().cloned().filter_map(DetailValue::from_json) {
                    collection.add(value);
                }
            }
        }

        let node = self.insert(item)?;
        for role in &spec.roles {
            self.add_authorized_role(node, role)?;
        }
        if parent.is_some() {
            self.attach(node, parent)?;
        }
        for child in &spec.children {
            self.import(child, Some(node))?;
        }
        Ok(node)
    }

    /// Serialize `node` and its subtree back into an [`ItemSpec`]
    pub fn export(&self, node: NodeRef) -> Result<ItemSpec, ContentError> {
        let item = self.item(node)?;
        let details = item
            .details
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect();
        let collections = item
            .details
            .collections()
            .map(|c| (c.name.clone(), c.values().map(DetailValue::to_json).collect()))
            .collect();
        let children = item
            .child_refs()
            .iter()
            .map(|c| self.export(*c))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ItemSpec {
            id: if item.is_transient() { TRANSIENT_ID } else { item.id },
            name: item.name().unwrap_or_default().to_string(),
            title: Some(item.title.clone()),
            kind: item.kind,
            zone: item.zone_name.clone(),
            sort_order: Some(item.sort_order),
            visible: item.visible,
            state: Some(item.state),
            details,
            collections,
            roles: item
                .authorized_roles()
                .iter()
                .map(|r| r.role.clone())
                .collect(),
            children,
        })
    }
}
