//! Detail Store
//!
//! Sparse per-item attribute bag. Scalars live in a key/value map, multi-valued
//! groups in a separate map of named collections.

pub mod collection;
pub mod value;

pub use collection::DetailCollection;
pub use value::{ContentDetail, DetailType, DetailValue};

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Per-item detail storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailStore {
    details: BTreeMap<String, ContentDetail>,
    collections: BTreeMap<String, DetailCollection>,
}

fn require_key(key: &str) -> Result<(), ContentError> {
    if key.is_empty() {
        return Err(ContentError::InvalidArgument(
            "detail key cannot be empty".to_string(),
        ));
    }
    Ok(())
}

impl DetailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ContentDetail> {
        self.details.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&DetailValue> {
        self.details.get(key).map(|d| &d.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.details.contains_key(key)
    }

    /// Store `value` under `key`.
    ///
    /// An existing entry of the same value type is updated in place and keeps
    /// its detail id; an entry of another type is replaced.
    pub fn set(&mut self, key: &str, value: impl Into<DetailValue>) -> Result<(), ContentError> {
        require_key(key)?;
        let value = value.into();
        match self.details.get_mut(key) {
            Some(existing) if existing.value.detail_type() == value.detail_type() => {
                trace!(key, "Updating detail in place");
                existing.value = value;
            }
            _ => {
                trace!(key, "Storing new detail");
                self.details
                    .insert(key.to_string(), ContentDetail::new(key, value));
            }
        }
        Ok(())
    }

    /// Store `value` unless it equals `default`, in which case the key is cleared.
    pub fn set_with_default(
        &mut self,
        key: &str,
        value: impl Into<DetailValue>,
        default: impl Into<DetailValue>,
    ) -> Result<(), ContentError> {
        require_key(key)?;
        let value = value.into();
        if value == default.into() {
            self.details.remove(key);
            Ok(())
        } else {
            self.set(key, value)
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ContentDetail> {
        self.details.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.details.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.details.iter().map(|(k, d)| (k.as_str(), &d.value))
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty() && self.collections.is_empty()
    }

    pub fn collection(&self, name: &str) -> Option<&DetailCollection> {
        self.collections.get(name)
    }

    /// Fetch a collection for writing, creating it when `create_if_missing` is set.
    pub fn get_or_create_collection(
        &mut self,
        name: &str,
        create_if_missing: bool,
    ) -> Result<Option<&mut DetailCollection>, ContentError> {
        require_key(name)?;
        if create_if_missing {
            let collection = self
                .collections
                .entry(name.to_string())
                .or_insert_with(|| DetailCollection::new(name));
            Ok(Some(collection))
        } else {
            Ok(self.collections.get_mut(name))
        }
    }

    pub fn remove_collection(&mut self, name: &str) -> Option<DetailCollection> {
        self.collections.remove(name)
    }

    pub fn collections(&self) -> impl Iterator<Item = &DetailCollection> {
        self.collections.values()
    }

    /// Deep copy with fresh detail identities
    pub fn detached_copy(&self) -> Self {
        Self {
            details: self
                .details
                .iter()
                .map(|(k, d)| (k.clone(), d.detached_copy()))
                .collect(),
            collections: self
                .collections
                .iter()
                .map(|(k, c)| (k.clone(), c.detached_copy()))
                .collect(),
        }
    }

    /// Make this store mirror `source`.
    ///
    /// Every detail and collection of `source` is copied in (same-typed details
    /// keep their identity), then entries absent from `source` are dropped.
    pub fn sync_from(&mut self, source: &DetailStore) -> Result<(), ContentError> {
        for (key, detail) in &source.details {
            self.set(key, detail.value.clone())?;
        }
        self.details.retain(|key, _| source.details.contains_key(key));

        for (name, collection) in &source.collections {
            match self.collections.get_mut(name) {
                Some(existing) => existing.replace(collection.values().cloned()),
                None => {
                    self.collections
                        .insert(name.clone(), collection.detached_copy());
                }
            }
        }
        self.collections
            .retain(|name, _| source.collections.contains_key(name));
        Ok(())
    }
}
