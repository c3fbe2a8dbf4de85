//! Detail collections: named multi-valued groups of details.

use crate::details::value::{ContentDetail, DetailValue};
use crate::types::TRANSIENT_ID;
use serde::{Deserialize, Serialize};

/// A named, ordered group of detail values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailCollection {
    pub id: i32,
    pub name: String,
    details: Vec<ContentDetail>,
}

impl DetailCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TRANSIENT_ID,
            name: name.into(),
            details: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Append a value to the collection
    pub fn add(&mut self, value: impl Into<DetailValue>) {
        let detail = ContentDetail::new(self.name.clone(), value.into());
        self.details.push(detail);
    }

    /// Remove the first entry holding `value`. Returns whether one was found.
    pub fn remove(&mut self, value: &DetailValue) -> bool {
        match self.details.iter().position(|d| &d.value == value) {
            Some(index) => {
                self.details.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, value: &DetailValue) -> bool {
        self.details.iter().any(|d| &d.value == value)
    }

    /// Replace the collection's contents, keeping entries whose value is unchanged
    pub fn replace<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<DetailValue>,
    {
        let mut previous = std::mem::take(&mut self.details);
        for value in values {
            let value = value.into();
            match previous.iter().position(|d| d.value == value) {
                Some(index) => self.details.push(previous.remove(index)),
                None => self.details.push(ContentDetail::new(self.name.clone(), value)),
            }
        }
    }

    pub fn clear(&mut self) {
        self.details.clear();
    }

    pub fn values(&self) -> impl Iterator<Item = &DetailValue> {
        self.details.iter().map(|d| &d.value)
    }

    pub fn details(&self) -> &[ContentDetail] {
        &self.details
    }

    /// Deep copy with fresh identities for the collection and every entry
    pub fn detached_copy(&self) -> Self {
        Self {
            id: TRANSIENT_ID,
            name: self.name.clone(),
            details: self.details.iter().map(ContentDetail::detached_copy).collect(),
        }
    }
}
