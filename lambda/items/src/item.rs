//! Schema-less table items.
//!
//! An [`Item`] is an open JSON object. The only field the service looks at is
//! the `id` partition key; everything else is stored as the caller sent it.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::StoreError;

pub const ID_FIELD: &str = "id";
pub const INFO_FIELD: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Accepts a JSON object; any other JSON value is rejected.
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(StoreError::InvalidItem(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// The partition key, when present as a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn to_attributes(&self) -> HashMap<String, AttributeValue> {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value_to_attribute(value)))
            .collect()
    }

    pub fn from_attributes(
        attributes: HashMap<String, AttributeValue>,
    ) -> Result<Self, StoreError> {
        let mut fields = Map::new();
        for (name, attribute) in attributes {
            let value = attribute_to_value(&name, &attribute)?;
            fields.insert(name, value);
        }
        Ok(Self(fields))
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<Item> for Map<String, Value> {
    fn from(item: Item) -> Self {
        item.0
    }
}

/// Marshal a JSON value the way the DynamoDB document client does.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), value_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Unmarshal a DynamoDB attribute. `name` is only used for error messages.
pub fn attribute_to_value(name: &str, attribute: &AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(name, n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(|v| attribute_to_value(name, v))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut map = Map::new();
            for (key, v) in fields {
                map.insert(key.clone(), attribute_to_value(key, v)?);
            }
            Value::Object(map)
        }
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(name, n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|b| Value::String(encode_blob(b)))
                .collect(),
        ),
        _ => return Err(StoreError::UnsupportedAttribute(name.to_string())),
    };
    Ok(value)
}

fn parse_number(name: &str, raw: &str) -> Result<Number, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::InvalidNumber {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn encode_blob(blob: &Blob) -> String {
    general_purpose::STANDARD.encode(blob.as_ref())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
