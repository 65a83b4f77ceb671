//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod pubsub;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use pubsub::{MessageHandler, PubSub, PubSubError, PubSubMessage, message_handler};
pub use repository::IdeaRepository;
