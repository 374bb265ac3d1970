//! Resolver errors.
use displaydoc::Display;
use serde::Serialize;
use thiserror::Error;

pub use crate::configuration::ConfigurationError;
use crate::graphql;
use crate::graphql::ErrorExtension;
use crate::json_ext::Object;

/// Errors raised while mapping a resolver invocation.
///
/// These are reported to the caller as GraphQL field errors through
/// [`ResolverError::to_graphql_error`].
#[derive(Error, Display, Debug, Clone, Serialize, Eq, PartialEq)]
#[serde(untagged)]
#[ignore_extra_doc_attributes]
#[non_exhaustive]
pub enum ResolverError {
    /// invalid value for argument '{name}': {reason}
    InvalidArgument {
        /// Name of the argument.
        name: String,

        /// Why the value was rejected.
        reason: String,
    },

    /// resolver context was malformed: {reason}
    ///
    /// raised when the invocation context itself cannot be read, before any mapping happens
    MalformedContext {
        /// The reason deserialization failed.
        reason: String,
    },

    /// resolver output could not be serialized: {reason}
    MalformedOutput {
        /// The reason serialization failed.
        reason: String,
    },
}

impl ResolverError {
    pub(crate) fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        ResolverError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Convert the resolver error to a GraphQL error on the given response path.
    pub fn to_graphql_error(&self, path: Vec<String>) -> graphql::Error {
        let mut extensions = self.custom_extension_details().unwrap_or_default();
        extensions
            .entry("code")
            .or_insert_with(|| self.extension_code().into());

        graphql::Error {
            message: self.to_string(),
            path,
            extensions,
        }
    }
}

impl ErrorExtension for ResolverError {
    fn extension_code(&self) -> String {
        match self {
            ResolverError::InvalidArgument { .. } => "BAD_USER_INPUT",
            ResolverError::MalformedContext { .. } => "MALFORMED_CONTEXT",
            ResolverError::MalformedOutput { .. } => "MALFORMED_OUTPUT",
        }
        .to_string()
    }

    fn custom_extension_details(&self) -> Option<Object> {
        let mut obj = Object::new();
        if let ResolverError::InvalidArgument { name, .. } = self {
            obj.insert("argument", name.clone().into());
        }

        (!obj.is_empty()).then_some(obj)
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(err: serde_json::Error) -> Self {
        ResolverError::MalformedContext {
            reason: err.to_string(),
        }
    }
}
