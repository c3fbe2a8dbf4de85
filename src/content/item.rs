//! The content item entity and its kind/state tags.

use crate::content::security::{AuthorizedRole, Permission, Principal};
use crate::details::{DetailStore, DetailValue};
use crate::error::ContentError;
use crate::types::{ItemId, NodeRef, TRANSIENT_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Kind of content an item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Technical root of the whole tree
    RootPage,
    /// Home page of a site
    StartPage,
    #[default]
    Page,
    /// Content fragment placed in a zone of its parent page
    Part,
    /// Non-page container for data items
    Folder,
}

impl ItemKind {
    /// Whether items of this kind are addressable pages with their own URL
    pub fn is_page(&self) -> bool {
        matches!(
            self,
            ItemKind::RootPage | ItemKind::StartPage | ItemKind::Page
        )
    }

    /// Whether the default URL extension is appended to this kind's URLs
    pub fn uses_extension(&self) -> bool {
        matches!(self, ItemKind::Page)
    }

    /// Attributes stored as first-class fields for this kind.
    ///
    /// Anything outside the schema is kept in the detail bag.
    pub fn schema(&self) -> &'static [Field] {
        match self {
            ItemKind::Part => PART_FIELDS,
            _ => PAGE_FIELDS,
        }
    }
}

/// Lifecycle state of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentState {
    #[default]
    None,
    New,
    Draft,
    Waiting,
    Published,
    Unpublished,
    Deleted,
}

/// First-class attributes addressable by name through the attribute accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Name,
    ZoneName,
    SortOrder,
    Visible,
    Created,
    Updated,
    Published,
    Expires,
    SavedBy,
}

const PAGE_FIELDS: &[Field] = &[
    Field::Title,
    Field::Name,
    Field::SortOrder,
    Field::Visible,
    Field::Created,
    Field::Updated,
    Field::Published,
    Field::Expires,
    Field::SavedBy,
];

const PART_FIELDS: &[Field] = &[
    Field::Title,
    Field::Name,
    Field::ZoneName,
    Field::SortOrder,
    Field::Visible,
    Field::Created,
    Field::Updated,
    Field::Published,
    Field::Expires,
    Field::SavedBy,
];

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Name => "Name",
            Field::ZoneName => "ZoneName",
            Field::SortOrder => "SortOrder",
            Field::Visible => "Visible",
            Field::Created => "Created",
            Field::Updated => "Updated",
            Field::Published => "Published",
            Field::Expires => "Expires",
            Field::SavedBy => "SavedBy",
        }
    }
}

/// Value accepted by [`ContentTree::set_attribute`](crate::content::ContentTree::set_attribute)
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Scalar(DetailValue),
    /// Multi-valued input; only accepted through the collection API
    Collection(Vec<DetailValue>),
}

macro_rules! scalar_attribute {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_attribute!(bool, i32, f64, &str, String, DateTime<Utc>, NodeRef, DetailValue);

/// A page or data item in the content tree
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub title: String,
    pub(crate) name: Option<String>,
    pub zone_name: Option<String>,
    pub sort_order: i32,
    pub visible: bool,
    pub state: ContentState,
    pub saved_by: Option<String>,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub published: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,

    pub(crate) parent: Option<NodeRef>,
    pub(crate) children: Vec<NodeRef>,
    pub(crate) version_of: Option<NodeRef>,
    pub version_index: i32,
    pub(crate) ancestral_trail: String,
    pub(crate) url_cache: Option<(String, String)>,

    pub details: DetailStore,
    pub(crate) authorized_roles: Vec<AuthorizedRole>,
    pub altered_permissions: Permission,
}

impl ContentItem {
    /// Create a transient item. Timestamps default to now; `expires` stays unset.
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        let now = Utc::now();
        let name = name.into();
        Self {
            id: TRANSIENT_ID,
            kind,
            title: name.clone(),
            name: if name.is_empty() { None } else { Some(name) },
            zone_name: None,
            sort_order: 0,
            visible: true,
            state: ContentState::New,
            saved_by: None,
            created: now,
            updated: now,
            published: Some(now),
            expires: None,
            parent: None,
            children: Vec::new(),
            version_of: None,
            version_index: 0,
            ancestral_trail: "/".to_string(),
            url_cache: None,
            details: DetailStore::new(),
            authorized_roles: Vec::new(),
            altered_permissions: Permission::empty(),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.id == TRANSIENT_ID
    }

    pub fn is_page(&self) -> bool {
        self.kind.is_page()
    }

    /// The explicit name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name used in paths: the explicit name, or the id when unnamed
    pub fn name_or_id(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
    }

    /// Children in stored order, without version delegation or filtering
    pub fn child_refs(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn version_of(&self) -> Option<NodeRef> {
        self.version_of
    }

    pub fn is_version(&self) -> bool {
        self.version_of.is_some()
    }

    /// Chain of ancestor ids, e.g. `/1/5/` for an item under 5 under 1
    pub fn ancestral_trail(&self) -> &str {
        &self.ancestral_trail
    }

    pub fn authorized_roles(&self) -> &[AuthorizedRole] {
        &self.authorized_roles
    }

    /// Whether the item is published at `now` and not yet expired
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        let started = self.published.map_or(false, |p| p <= now);
        let ended = self.expires.map_or(false, |e| e <= now);
        started && !ended && self.state != ContentState::Deleted
    }

    /// Check read access for `principal`.
    ///
    /// Open unless read access was customised and a non-empty role list
    /// exists; then at least one rule must accept the principal.
    pub fn is_authorized(&self, principal: &Principal) -> bool {
        if !self.altered_permissions.contains(Permission::READ) {
            return true;
        }
        if self.authorized_roles.is_empty() {
            return true;
        }
        self.authorized_roles
            .iter()
            .any(|role| role.is_authorized(principal))
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name.filter(|n| !n.is_empty());
    }

    fn field(&self, name: &str) -> Option<Field> {
        self.kind
            .schema()
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Read an attribute by name: a first-class field of this kind, else a detail.
    pub fn attribute(&self, name: &str) -> Option<DetailValue> {
        let Some(field) = self.field(name) else {
            return self.details.value(name).cloned();
        };
        match field {
            Field::Title => Some(DetailValue::String(self.title.clone())),
            Field::Name => self.name.clone().map(DetailValue::String),
            Field::ZoneName => self.zone_name.clone().map(DetailValue::String),
            Field::SortOrder => Some(DetailValue::Int(self.sort_order)),
            Field::Visible => Some(DetailValue::Bool(self.visible)),
            Field::Created => Some(DetailValue::DateTime(self.created)),
            Field::Updated => Some(DetailValue::DateTime(self.updated)),
            Field::Published => self.published.map(DetailValue::DateTime),
            Field::Expires => self.expires.map(DetailValue::DateTime),
            Field::SavedBy => self.saved_by.clone().map(DetailValue::String),
        }
    }

    /// Write an attribute by name.
    ///
    /// Schema fields are type-checked and assigned directly; other names go
    /// to the detail bag, where `Null` removes the entry. Collections must be
    /// written through [`DetailStore::get_or_create_collection`].
    /// Returns the field that was written, if any. Callers outside the tree
    /// go through [`ContentTree::set_attribute`](crate::content::ContentTree::set_attribute),
    /// which keeps cached URLs in step with the name.
    pub(crate) fn set_attribute(
        &mut self,
        name: &str,
        value: AttributeValue,
    ) -> Result<Option<Field>, ContentError> {
        if name.is_empty() {
            return Err(ContentError::InvalidArgument(
                "attribute name cannot be empty".to_string(),
            ));
        }
        let value = match value {
            AttributeValue::Collection(_) => {
                return Err(ContentError::InvalidOperation(format!(
                    "cannot assign a collection to '{}'; use the detail collection API",
                    name
                )))
            }
            AttributeValue::Null => None,
            AttributeValue::Scalar(v) => Some(v),
        };

        let Some(field) = self.field(name) else {
            match value {
                Some(v) => self.details.set(name, v)?,
                None => {
                    self.details.remove(name);
                }
            }
            return Ok(None);
        };

        let mismatch = || {
            ContentError::InvalidArgument(format!(
                "value has the wrong type for field '{}'",
                field.name()
            ))
        };
        match (field, value) {
            (Field::Title, Some(DetailValue::String(s))) => self.title = s,
            (Field::Title, None) => self.title.clear(),
            (Field::Name, Some(DetailValue::String(s))) => self.set_name(Some(s)),
            (Field::Name, None) => self.set_name(None),
            (Field::ZoneName, Some(DetailValue::String(s))) => self.zone_name = Some(s),
            (Field::ZoneName, None) => self.zone_name = None,
            (Field::SortOrder, Some(DetailValue::Int(i))) => self.sort_order = i,
            (Field::Visible, Some(DetailValue::Bool(b))) => self.visible = b,
            (Field::Created, Some(DetailValue::DateTime(d))) => self.created = d,
            (Field::Updated, Some(DetailValue::DateTime(d))) => self.updated = d,
            (Field::Published, Some(DetailValue::DateTime(d))) => self.published = Some(d),
            (Field::Published, None) => self.published = None,
            (Field::Expires, Some(DetailValue::DateTime(d))) => self.expires = Some(d),
            (Field::Expires, None) => self.expires = None,
            (Field::SavedBy, Some(DetailValue::String(s))) => self.saved_by = Some(s),
            (Field::SavedBy, None) => self.saved_by = None,
            _ => return Err(mismatch()),
        }
        Ok(Some(field))
    }

    /// Copy of this item with identity, hierarchy and container state reset.
    ///
    /// Details, collections and role rules are deep-copied with fresh ids;
    /// role rules are left unbound until the copy gets a handle.
    pub(crate) fn detached_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.id = TRANSIENT_ID;
        copy.parent = None;
        copy.children = Vec::new();
        copy.version_of = None;
        copy.version_index = 0;
        copy.ancestral_trail = "/".to_string();
        copy.url_cache = None;
        copy.details = self.details.detached_copy();
        copy.authorized_roles = self
            .authorized_roles
            .iter()
            .map(|r| r.rebound_to(None))
            .collect();
        copy
    }
}

impl PartialEq for ContentItem {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.id != TRANSIENT_ID && self.id == other.id)
    }
}

impl Eq for ContentItem {}

impl Hash for ContentItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
