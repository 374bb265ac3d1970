//! `Mutation.createEvent`: records an event for a user as a single store item.
//!
//! The request function generates the event identity (`id`, `createdAt`) and encodes the caller's
//! `userId` and `payLoad` into a single-item insert. The response function decodes the item the
//! store hands back.

use crate::configuration::CreateEventConfig;
use crate::context::Context;
use crate::dynamodb::AttributeValue;
use crate::dynamodb::Item;
use crate::dynamodb::from_item;
use crate::dynamodb::parse_number;
use crate::dynamodb::to_dynamodb;
use crate::error::ResolverError;
use crate::json_ext::Value;
use crate::json_ext::ValueExt;
use crate::request::Condition;
use crate::request::PutItemRequest;
use crate::resolver::Resolver;
use crate::util::Util;

const ID: &str = "id";
const USER_ID: &str = "userId";
const CREATED_AT: &str = "createdAt";
const PAYLOAD: &str = "payLoad";

/// Resolver for the `createEvent` mutation.
#[derive(Clone, Debug, Default)]
pub struct CreateEvent {
    util: Util,
    prevent_overwrite: bool,
}

impl CreateEvent {
    /// A resolver using the system clock and random identifiers.
    pub fn new(config: &CreateEventConfig) -> Self {
        Self::with_util(
            config,
            Util::builder().precision(config.timestamp_precision).build(),
        )
    }

    /// A resolver using the given capabilities. Their timestamp precision takes precedence over
    /// the configured one.
    pub fn with_util(config: &CreateEventConfig, util: Util) -> Self {
        Self {
            util,
            prevent_overwrite: config.prevent_overwrite,
        }
    }
}

impl Resolver for CreateEvent {
    type Request = PutItemRequest;

    fn coordinate(&self) -> &'static str {
        "Mutation.createEvent"
    }

    fn request(&self, context: &Context) -> Result<PutItemRequest, ResolverError> {
        let user_id = user_id_attribute(context.argument(USER_ID)).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected createEvent arguments");
        })?;
        let payload = context
            .argument(PAYLOAD)
            .map(to_dynamodb)
            .unwrap_or_else(AttributeValue::null);

        let id = self.util.auto_id();
        let created_at = self.util.now_iso8601();
        tracing::debug!(%id, %created_at, "generated event identity");

        let key = Item::from([(ID.to_string(), AttributeValue::string(&id))]);
        let attribute_values = Item::from([
            (ID.to_string(), AttributeValue::string(id)),
            (USER_ID.to_string(), user_id),
            (CREATED_AT.to_string(), AttributeValue::string(created_at)),
            (PAYLOAD.to_string(), payload),
        ]);

        let mut request = PutItemRequest::new(key, attribute_values);
        if self.prevent_overwrite {
            request = request.with_condition(Condition::attribute_not_exists(ID));
        }
        tracing::trace!(?request, "built write request");
        Ok(request)
    }

    fn response(&self, context: &Context) -> Value {
        match &context.result {
            Some(item) => Value::Object(from_item(item)),
            None => {
                tracing::debug!("store returned no item");
                Value::Null
            }
        }
    }
}

/// The store carries numbers as decimal text, so `userId` must be a number, or a string that
/// already holds one. Strings are re-rendered from the parsed number, so `"+5"` is stored as `5`.
fn user_id_attribute(value: Option<&Value>) -> Result<AttributeValue, ResolverError> {
    match value {
        Some(Value::Number(number)) => Ok(AttributeValue::number(number)),
        Some(Value::String(text)) => {
            let text = text.as_str().trim();
            parse_number(text)
                .map(|number| AttributeValue::number(&number))
                .ok_or_else(|| {
                    ResolverError::invalid_argument(USER_ID, format!("'{text}' is not a number"))
                })
        }
        None | Some(Value::Null) => Err(ResolverError::invalid_argument(
            USER_ID,
            "a value is required",
        )),
        Some(other) => Err(ResolverError::invalid_argument(
            USER_ID,
            format!("expected a number, found {}", other.json_type_name()),
        )),
    }
}
