//! Flat record types
//!
//! A flat record is the single JSON object emitted per resource. Keys are kept
//! in a `BTreeMap` so every record serializes with its keys in byte order.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::format::RecordFormatter;

/// Value stored under a flat record key
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<FlatValue>),
    Map(BTreeMap<String, FlatValue>),
}

impl Serialize for FlatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlatValue::Null => serializer.serialize_unit(),
            FlatValue::Bool(b) => serializer.serialize_bool(*b),
            FlatValue::Int(i) => serializer.serialize_i64(*i),
            // JSON has no NaN/Infinity; refuse instead of silently writing null
            FlatValue::Double(d) if !d.is_finite() => {
                Err(S::Error::custom(format!("unsupported value: {}", d)))
            }
            FlatValue::Double(d) => serializer.serialize_f64(*d),
            FlatValue::Str(s) => serializer.serialize_str(s),
            FlatValue::Bytes(b) => serializer.serialize_str(&BASE64.encode(b)),
            FlatValue::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            FlatValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl From<i64> for FlatValue {
    fn from(value: i64) -> Self {
        FlatValue::Int(value)
    }
}

impl From<f64> for FlatValue {
    fn from(value: f64) -> Self {
        FlatValue::Double(value)
    }
}

impl From<bool> for FlatValue {
    fn from(value: bool) -> Self {
        FlatValue::Bool(value)
    }
}

impl From<&str> for FlatValue {
    fn from(value: &str) -> Self {
        FlatValue::Str(value.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        FlatValue::Str(value)
    }
}

/// One flattened resource: attributes, latest metric values and `timestamp`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatRecord {
    fields: BTreeMap<String, FlatValue>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field
    pub fn insert(&mut self, key: impl Into<String>, value: FlatValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys in serialization order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Encode as a single compact JSON object
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(128);
        let mut ser = serde_json::Serializer::with_formatter(&mut out, RecordFormatter);
        self.serialize(&mut ser)?;
        Ok(out)
    }
}

impl FromIterator<(String, FlatValue)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (String, FlatValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
