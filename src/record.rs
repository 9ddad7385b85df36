//! Records mirrored from the remote collection
//!
//! A record is an open map of attribute name to string value. The declared
//! schema decides which attributes are rendered and validated; anything else
//! the server sends is carried along untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordError;

/// Opaque identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Attribute values of a record that has not been persisted (or whose id is
/// being withheld, as in create and update request bodies).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDraft(BTreeMap<String, String>);

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of `name`, or "" when absent
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecordDraft {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A persisted record: an id plus its attributes.
///
/// Serializes as a flat JSON object (`{"id": ..., "firstName": ...}`).
/// Decoding accepts numeric ids and scalar non-string attributes, which are
/// stringified; nulls, arrays and objects are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    attributes: RecordDraft,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, attributes: RecordDraft) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Value of `name`, or "" when absent
    pub fn value(&self, name: &str) -> &str {
        self.attributes.value(name)
    }

    pub fn attributes(&self) -> &RecordDraft {
        &self.attributes
    }

    /// Attribute values without the id
    pub fn to_draft(&self) -> RecordDraft {
        self.attributes.clone()
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = RecordError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match map.remove("id") {
            Some(Value::String(s)) => RecordId(s),
            Some(Value::Number(n)) => RecordId(n.to_string()),
            Some(other) => return Err(RecordError::InvalidId(other.to_string())),
            None => return Err(RecordError::MissingId),
        };

        let attributes = map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                Value::Bool(b) => Some((key, b.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect();

        Ok(Self { id, attributes })
    }
}
