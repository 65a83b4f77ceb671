//! # IdeasLab Core
//!
//! The domain layer of IdeasLab.
//! This crate holds the idea model, the owner-scoped access layer and the
//! list pipeline. Storage and identity are reached only through `ports`.

pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod services;

pub use error::{IdeaError, RepoError, WriteError};
