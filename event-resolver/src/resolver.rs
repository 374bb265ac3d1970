//! The request/response contract every field resolver follows.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::context::Context;
use crate::error::ResolverError;
use crate::json_ext::Value;

/// Maps a field invocation onto a data source request, and the data source result back onto the
/// field value.
///
/// Both functions are pure: the platform executes the request between the two calls, and the
/// resolver never observes how.
pub trait Resolver {
    /// The request handed to the data source.
    type Request: Serialize;

    /// The `Type.field` coordinate this resolver is attached to.
    fn coordinate(&self) -> &'static str;

    /// Builds the data source request from the field arguments.
    fn request(&self, context: &Context) -> Result<Self::Request, ResolverError>;

    /// Maps the data source result onto the field value. `Value::Null` when there is none.
    fn response(&self, context: &Context) -> Value;
}

/// Which half of a resolver to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolverFunction {
    Request,
    Response,
}

impl FromStr for ResolverFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(ResolverFunction::Request),
            "response" => Ok(ResolverFunction::Response),
            other => Err(format!(
                "unknown resolver function '{other}', expected 'request' or 'response'"
            )),
        }
    }
}

impl fmt::Display for ResolverFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverFunction::Request => f.write_str("request"),
            ResolverFunction::Response => f.write_str("response"),
        }
    }
}

/// Runs one half of `resolver` against `context`, rendering the outcome as JSON.
pub fn evaluate<R: Resolver>(
    resolver: &R,
    function: ResolverFunction,
    context: &Context,
) -> Result<serde_json::Value, ResolverError> {
    let _span = tracing::info_span!(
        "resolver",
        coordinate = resolver.coordinate(),
        function = %function
    )
    .entered();

    let output = match function {
        ResolverFunction::Request => serde_json::to_value(resolver.request(context)?),
        ResolverFunction::Response => serde_json::to_value(resolver.response(context)),
    };
    output.map_err(|err| ResolverError::MalformedOutput {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_function_names() {
        assert_eq!(
            "request".parse::<ResolverFunction>(),
            Ok(ResolverFunction::Request)
        );
        assert_eq!(
            "response".parse::<ResolverFunction>(),
            Ok(ResolverFunction::Response)
        );
        assert!("pipeline".parse::<ResolverFunction>().is_err());
        assert_eq!(ResolverFunction::Response.to_string(), "response");
    }
}
