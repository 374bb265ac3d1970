//! Field resolvers.

mod create_event;

pub use create_event::CreateEvent;
