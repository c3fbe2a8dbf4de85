//! Detail values: the typed scalars stored in an item's detail bag.

use crate::types::{NodeRef, TRANSIENT_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A storable detail value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DetailValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    DateTime(DateTime<Utc>),
    String(String),
    /// Reference to another item in the same tree
    Link(NodeRef),
    /// Structured value kept as JSON
    Object(serde_json::Value),
}

/// Discriminant of a [`DetailValue`], used to decide whether an existing
/// detail can be updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailType {
    Bool,
    Int,
    Double,
    DateTime,
    String,
    Link,
    Object,
}

impl DetailValue {
    pub fn detail_type(&self) -> DetailType {
        match self {
            DetailValue::Bool(_) => DetailType::Bool,
            DetailValue::Int(_) => DetailType::Int,
            DetailValue::Double(_) => DetailType::Double,
            DetailValue::DateTime(_) => DetailType::DateTime,
            DetailValue::String(_) => DetailType::String,
            DetailValue::Link(_) => DetailType::Link,
            DetailValue::Object(_) => DetailType::Object,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DetailValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            DetailValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DetailValue::Double(d) => Some(*d),
            DetailValue::Int(i) => Some(f64::from(*i)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DetailValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DetailValue::DateTime(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<NodeRef> {
        match self {
            DetailValue::Link(node) => Some(*node),
            _ => None,
        }
    }

    /// Convert a JSON value into the closest detail value.
    ///
    /// Integers that fit `i32` become `Int`, other numbers `Double`; arrays and
    /// objects are kept as `Object`. Returns `None` for JSON null.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(DetailValue::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                Some(i) => Some(DetailValue::Int(i)),
                None => n.as_f64().map(DetailValue::Double),
            },
            serde_json::Value::String(s) => Some(DetailValue::String(s)),
            other => Some(DetailValue::Object(other)),
        }
    }

    /// Plain JSON form, the inverse of [`from_json`](Self::from_json) for
    /// scalar values. Date-times become RFC 3339 strings, links `{"link": n}`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DetailValue::Bool(b) => serde_json::Value::Bool(*b),
            DetailValue::Int(i) => serde_json::Value::from(*i),
            DetailValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DetailValue::DateTime(d) => serde_json::Value::String(d.to_rfc3339()),
            DetailValue::String(s) => serde_json::Value::String(s.clone()),
            DetailValue::Link(node) => serde_json::json!({ "link": node.index() }),
            DetailValue::Object(v) => v.clone(),
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Bool(b) => write!(f, "{}", b),
            DetailValue::Int(i) => write!(f, "{}", i),
            DetailValue::Double(d) => write!(f, "{}", d),
            DetailValue::DateTime(d) => write!(f, "{}", d.to_rfc3339()),
            DetailValue::String(s) => f.write_str(s),
            DetailValue::Link(node) => write!(f, "{}", node),
            DetailValue::Object(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for DetailValue {
    fn from(value: bool) -> Self {
        DetailValue::Bool(value)
    }
}

impl From<i32> for DetailValue {
    fn from(value: i32) -> Self {
        DetailValue::Int(value)
    }
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        DetailValue::Double(value)
    }
}

impl From<DateTime<Utc>> for DetailValue {
    fn from(value: DateTime<Utc>) -> Self {
        DetailValue::DateTime(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        DetailValue::String(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        DetailValue::String(value)
    }
}

impl From<NodeRef> for DetailValue {
    fn from(value: NodeRef) -> Self {
        DetailValue::Link(value)
    }
}

/// A named detail entry owned by one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetail {
    /// Persisted detail id, zero until the owning source saves it
    pub id: i32,
    pub name: String,
    pub value: DetailValue,
}

impl ContentDetail {
    pub fn new(name: impl Into<String>, value: DetailValue) -> Self {
        Self {
            id: TRANSIENT_ID,
            name: name.into(),
            value,
        }
    }

    /// Copy of this detail with a fresh identity, for attaching to another item
    pub fn detached_copy(&self) -> Self {
        Self {
            id: TRANSIENT_ID,
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}
