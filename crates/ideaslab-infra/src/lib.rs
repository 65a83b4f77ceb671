//! # IdeasLab Infrastructure
//!
//! Concrete implementations of the ports defined in `ideaslab-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL idea store via SeaORM
//! - `auth` - JWT token validation

pub mod database;
pub mod pubsub;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryIdeaRepository};
pub use pubsub::InMemoryPubSub;

#[cfg(feature = "postgres")]
pub use database::{PostgresIdeaRepository, connect};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(test)]
mod tests;
