//! The invocation context handed to a resolver by the GraphQL execution engine.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::dynamodb::Item;
use crate::error::ResolverError;
use crate::json_ext::Object;
use crate::json_ext::Value;

/// Information about the field being resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    /// Name of the field.
    pub field_name: String,
}

/// Caller arguments, plus the store result once the write has been executed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Context {
    /// The field arguments, after coercion by the execution engine.
    #[serde(alias = "args", deserialize_with = "null_as_empty")]
    pub arguments: Object,

    /// The typed item returned by the store. `None` both when the store returned nothing and
    /// before the write has run.
    pub result: Option<Item>,

    /// The field being resolved, when the platform provides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
}

/// A field without arguments may be handed over as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Object, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Object>::deserialize(deserializer)?.unwrap_or_default())
}

impl Context {
    /// A context carrying only field arguments.
    pub fn with_arguments(arguments: Object) -> Self {
        Self {
            arguments,
            ..Default::default()
        }
    }

    /// Read a context from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ResolverError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Attach a store result.
    pub fn with_result(mut self, result: Option<Item>) -> Self {
        self.result = result;
        self
    }

    /// The value of a field argument, if the caller supplied it.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// The response path of the field being resolved.
    pub fn path(&self) -> Vec<String> {
        self.info
            .as_ref()
            .map(|info| vec![info.field_name.clone()])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json_bytes::json;

    use super::*;
    use crate::dynamodb::AttributeValue;

    #[test]
    fn reads_platform_context() {
        let context = Context::from_json(
            r#"{
                "arguments": { "userId": 42, "payLoad": { "title": "Launch" } },
                "result": { "id": { "S": "abc" } },
                "info": { "parentTypeName": "Mutation", "fieldName": "createEvent" },
                "identity": { "sub": "ignored" }
            }"#,
        )
        .unwrap();

        assert_eq!(context.argument("userId"), Some(&json!(42)));
        assert_eq!(
            context.result.as_ref().and_then(|item| item.get("id")),
            Some(&AttributeValue::string("abc"))
        );
        assert_eq!(context.path(), vec!["createEvent".to_string()]);
    }

    #[test]
    fn accepts_short_argument_name() {
        let context = Context::from_json(r#"{ "args": { "userId": 1 } }"#).unwrap();
        assert_eq!(context.argument("userId"), Some(&json!(1)));
        assert!(context.result.is_none());
        assert!(context.path().is_empty());
    }

    #[test]
    fn null_result_is_absent() {
        let context = Context::from_json(r#"{ "arguments": {}, "result": null }"#).unwrap();
        assert!(context.result.is_none());
    }

    #[test]
    fn null_arguments_are_empty() {
        let context = Context::from_json(r#"{ "arguments": null }"#).unwrap();
        assert!(context.arguments.is_empty());

        let context = Context::from_json(r#"{ "args": null, "result": null }"#).unwrap();
        assert!(context.arguments.is_empty());
    }

    #[test]
    fn malformed_result_is_rejected() {
        let error = Context::from_json(r#"{ "result": { "id": "plain" } }"#).unwrap_err();
        assert!(matches!(error, ResolverError::MalformedContext { .. }));
    }
}
