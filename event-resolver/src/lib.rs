//! Resolver mapping for the `createEvent` mutation.
//!
//! The GraphQL execution engine calls [`Resolver::request`] with the field arguments, executes
//! the returned [`PutItemRequest`] against the key-value store, then calls
//! [`Resolver::response`] with the store's result to produce the field value.

#![warn(unreachable_pub)]

pub mod configuration;
pub mod context;
pub mod dynamodb;
pub mod error;
mod executable;
pub mod graphql;
pub mod json_ext;
pub mod request;
pub mod resolver;
pub mod resolvers;
pub mod util;

pub use configuration::Configuration;
pub use context::Context;
pub use error::ResolverError;
pub use executable::main;
pub use request::PutItemRequest;
pub use resolver::Resolver;
pub use resolver::ResolverFunction;
pub use resolvers::CreateEvent;
pub use util::Util;
