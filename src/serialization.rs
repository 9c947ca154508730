use crate::tag::Tag;
use crate::value::Value;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use std::collections::BTreeMap;

/// A self-describing, serde-serializable view of a tag tree, used to hand
/// SDL data to generic consumers (JSON, YAML). SDL-specific value kinds
/// with no JSON counterpart are mapped to their canonical literal text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlainValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<PlainValue>),
    Object(BTreeMap<String, PlainValue>),
}

fn value_to_plain(value: &Value) -> PlainValue {
    match value {
        Value::Null => PlainValue::Null,
        Value::Boolean(b) => PlainValue::Bool(*b),
        Value::Int32(i) => PlainValue::Int(i64::from(*i)),
        Value::Int64(i) => PlainValue::Int(*i),
        Value::Float32(f) => PlainValue::Float(f64::from(*f)),
        Value::Float64(f) => PlainValue::Float(*f),
        Value::Decimal(d) => PlainValue::String(d.to_string()),
        Value::String(s) => PlainValue::String(s.clone()),
        Value::Character(c) => PlainValue::String(c.to_string()),
        Value::Binary(bytes) => PlainValue::String(BASE64.encode(bytes)),
        Value::Date(_) | Value::DateTime(_) | Value::TimeSpan(_) => {
            PlainValue::String(value.to_string())
        }
    }
}

/// Converts a tag into a generic object with `name`, `namespace` (when
/// non-empty), `values`, `attributes` and `children` entries; empty
/// collections are omitted.
pub fn to_plain_value(tag: &Tag) -> PlainValue {
    let mut map = BTreeMap::new();
    map.insert(
        "name".to_string(),
        PlainValue::String(tag.name().to_string()),
    );
    if !tag.namespace().is_empty() {
        map.insert(
            "namespace".to_string(),
            PlainValue::String(tag.namespace().to_string()),
        );
    }
    if !tag.values().is_empty() {
        map.insert(
            "values".to_string(),
            PlainValue::Array(tag.values().iter().map(value_to_plain).collect()),
        );
    }
    if !tag.attributes().is_empty() {
        let mut attributes = BTreeMap::new();
        for (name, (namespace, value)) in tag.attributes() {
            let key = if namespace.is_empty() {
                name.clone()
            } else {
                format!("{namespace}:{name}")
            };
            attributes.insert(key, value_to_plain(value));
        }
        map.insert("attributes".to_string(), PlainValue::Object(attributes));
    }
    if !tag.children().is_empty() {
        map.insert(
            "children".to_string(),
            PlainValue::Array(tag.children().iter().map(to_plain_value).collect()),
        );
    }
    PlainValue::Object(map)
}

impl Tag {
    /// Serializes the tag tree into pretty-printed JSON.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&to_plain_value(self))
    }

    /// Serializes the tag tree into YAML.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&to_plain_value(self))
    }
}
