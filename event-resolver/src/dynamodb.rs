//! Typed attribute values of the key-value store.
//!
//! The store tags every value with its native type on the wire, as an object with a single key:
//! `{"S": "Launch"}`, `{"N": "42"}`, `{"L": [{"S": "a"}]}`. Numbers are always carried as
//! decimal text.
//!
//! [`to_dynamodb`] and [`to_map`] encode plain JSON into that form for write requests, and
//! [`from_dynamodb`] and [`from_item`] turn a typed item returned by the store back into plain
//! JSON for the GraphQL response.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;
use serde_json_bytes::ByteString;

use crate::json_ext::Object;
use crate::json_ext::Value;

/// A typed item: attribute names mapped to their typed values, in insertion order.
pub type Item = IndexMap<String, AttributeValue>;

/// A value in the store's typed attribute encoding.
///
/// Sets and binaries only ever appear in store results; [`to_dynamodb`] never produces them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A string.
    S(String),
    /// A number, as decimal text.
    N(String),
    /// A boolean.
    #[serde(rename = "BOOL")]
    Bool(bool),
    /// The null value. The wire form is always `{"NULL": true}`.
    #[serde(rename = "NULL")]
    Null(bool),
    /// An ordered list of typed values.
    L(Vec<AttributeValue>),
    /// A map of attribute names to typed values.
    M(Item),
    /// A set of strings.
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    /// A set of numbers, as decimal text.
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    /// Binary data, base64 encoded.
    B(String),
    /// A set of binary values, base64 encoded.
    #[serde(rename = "BS")]
    Bs(Vec<String>),
}

impl AttributeValue {
    /// The typed null value.
    pub fn null() -> Self {
        AttributeValue::Null(true)
    }

    /// A string-typed value.
    pub fn string(value: impl Into<String>) -> Self {
        AttributeValue::S(value.into())
    }

    /// A number-typed value carrying the decimal text of `number`.
    pub fn number(number: &Number) -> Self {
        AttributeValue::N(number.to_string())
    }

    /// The text of a string-typed value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The decimal text of a number-typed value.
    pub fn as_number_text(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n.as_str()),
            _ => None,
        }
    }
}

/// Encodes a plain JSON value into its typed form.
///
/// null becomes `NULL`, booleans `BOOL`, numbers `N`, strings `S`, arrays `L` and objects `M`,
/// recursively.
pub fn to_dynamodb(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::null(),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::number(n),
        Value::String(s) => AttributeValue::string(s.as_str()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_dynamodb).collect()),
        Value::Object(object) => to_map(object),
    }
}

/// Encodes a JSON object as a map-typed value.
pub fn to_map(object: &Object) -> AttributeValue {
    AttributeValue::M(to_map_values(object))
}

/// Encodes each entry of a JSON object, without wrapping the result in a map-typed value.
///
/// This is the shape expected for the attribute values of a write request.
pub fn to_map_values(object: &Object) -> Item {
    object
        .iter()
        .map(|(key, value)| (key.as_str().to_string(), to_dynamodb(value)))
        .collect()
}

/// Decodes a typed value back into plain JSON.
///
/// This is total: number text that does not parse as a finite number is kept as a string.
pub fn from_dynamodb(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) | AttributeValue::B(s) => Value::String(ByteString::from(s.as_str())),
        AttributeValue::N(n) => number_value(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(values.iter().map(from_dynamodb).collect()),
        AttributeValue::M(item) => Value::Object(from_item(item)),
        AttributeValue::Ss(values) | AttributeValue::Bs(values) => Value::Array(
            values
                .iter()
                .map(|s| Value::String(ByteString::from(s.as_str())))
                .collect(),
        ),
        AttributeValue::Ns(values) => {
            Value::Array(values.iter().map(|n| number_value(n)).collect())
        }
    }
}

/// Decodes every attribute of a typed item into a plain JSON object.
pub fn from_item(item: &Item) -> Object {
    let mut object = Object::new();
    for (name, value) in item {
        object.insert(name.as_str(), from_dynamodb(value));
    }
    object
}

/// Parses decimal number text as i64, then u64, then a finite f64.
pub(crate) fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(u.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn number_value(text: &str) -> Value {
    match parse_number(text) {
        Some(number) => Value::Number(number),
        None => Value::String(ByteString::from(text.trim())),
    }
}
