//! Write operation descriptors handed back to the platform for execution against the store.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use crate::dynamodb::AttributeValue;
use crate::dynamodb::Item;

/// The store operation a descriptor asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Insert a single item, replacing any item with the same key.
    PutItem,
}

/// A condition the store evaluates before applying the write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub expression: String,

    /// Placeholders used in `expression`, mapped to the attribute names they stand for.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub expression_names: IndexMap<String, String>,
}

impl Condition {
    /// Fails the write when an item with the given key attribute already exists.
    pub fn attribute_not_exists(attribute: &str) -> Self {
        let placeholder = format!("#{attribute}");
        Self {
            expression: format!("attribute_not_exists({placeholder})"),
            expression_names: IndexMap::from([(placeholder, attribute.to_string())]),
        }
    }
}

/// A single-item insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutItemRequest {
    pub operation: Operation,

    /// The primary key of the item.
    pub key: Item,

    /// Every attribute of the item, key attributes included.
    pub attribute_values: Item,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl PutItemRequest {
    /// An unconditional insert of `attribute_values` under `key`.
    pub fn new(key: Item, attribute_values: Item) -> Self {
        Self {
            operation: Operation::PutItem,
            key,
            attribute_values,
            condition: None,
        }
    }

    /// Guard the write with a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// The value of a key attribute.
    pub fn key_value(&self, name: &str) -> Option<&AttributeValue> {
        self.key.get(name)
    }
}
