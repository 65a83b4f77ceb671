//! Domain entities - the core business objects.

mod idea;

pub use idea::{Category, Idea, IdeaChanges, NewIdea, UnknownCategory};
