//! Document value model for destination stores
//!
//! A [`Document`] is a map of field names to [`FieldValue`]s. Values use
//! the same envelope shape as the Firestore REST API (`{"stringValue": "x"}`,
//! `{"timestampValue": "..."}`) when serialized, which keeps native
//! timestamps distinguishable from plain strings in storage.

use crate::timestamp::{parse_iso, to_iso_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Top-level fields converted from ISO-8601 strings into native timestamps
pub const TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Generate a store-assigned document identifier (UUIDv7)
///
/// # Examples
///
/// ```
/// use seedport_domain::new_document_id;
///
/// let a = new_document_id();
/// let b = new_document_id();
/// assert_ne!(a, b);
/// ```
pub fn new_document_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// A single document field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// JSON null
    #[serde(rename = "nullValue")]
    Null,
    /// Boolean
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// Signed 64-bit integer
    #[serde(rename = "integerValue")]
    Integer(i64),
    /// Floating point number
    #[serde(rename = "doubleValue")]
    Double(f64),
    /// UTF-8 string
    #[serde(rename = "stringValue")]
    String(String),
    /// Native point in time
    #[serde(rename = "timestampValue")]
    Timestamp(DateTime<Utc>),
    /// Ordered list of values
    #[serde(rename = "arrayValue")]
    Array(Vec<FieldValue>),
    /// Nested map
    #[serde(rename = "mapValue")]
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Convert a plain JSON value, leaving strings as strings
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Array(items) => FieldValue::Array(items.iter().map(FieldValue::from_json).collect()),
            Value::Object(map) => FieldValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to plain JSON, rendering timestamps as ISO-8601 strings
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::Number((*i).into()),
            FieldValue::Double(d) => Number::from_f64(*d).map(Value::Number).unwrap_or(Value::Null),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Timestamp(ts) => Value::String(to_iso_millis(ts)),
            FieldValue::Array(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// String content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamp content, if this is a timestamp value
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

/// A document: field name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a JSON object.
    ///
    /// Top-level fields named in [`TIMESTAMP_FIELDS`] that hold a parseable
    /// ISO-8601 string become [`FieldValue::Timestamp`]; unparseable strings
    /// are kept as strings. Everything else passes through unchanged.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .map(|(key, value)| {
                let converted = match value {
                    Value::String(s) if TIMESTAMP_FIELDS.contains(&key.as_str()) => parse_iso(s)
                        .map(FieldValue::Timestamp)
                        .unwrap_or_else(|| FieldValue::String(s.clone())),
                    other => FieldValue::from_json(other),
                };
                (key.clone(), converted)
            })
            .collect();
        Self { fields }
    }

    /// Render as a plain JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Look up a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}
