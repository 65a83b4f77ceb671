use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Idea, IdeaChanges, NewIdea};
use crate::error::RepoError;

/// Contract of the idea store.
///
/// Every read and write that touches owned rows carries the owner as an
/// explicit predicate; implementations must not widen it.
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// All rows owned by `owner`, newest `created_at` first.
    async fn find_owned(&self, owner: Uuid) -> Result<Vec<Idea>, RepoError>;

    /// The row with `id` if it is owned by `owner`.
    async fn find_owned_by_id(&self, id: Uuid, owner: Uuid) -> Result<Option<Idea>, RepoError>;

    /// Ids of legacy rows whose owner is unset.
    async fn find_unowned_ids(&self) -> Result<Vec<Uuid>, RepoError>;

    /// Set the owner of `id` only while it is still unset.
    /// Returns whether this call claimed the row.
    async fn claim_unowned(&self, id: Uuid, owner: Uuid) -> Result<bool, RepoError>;

    /// Insert a new row owned by `owner`. The store assigns `id` and `created_at`.
    async fn insert(&self, owner: Uuid, idea: NewIdea) -> Result<Idea, RepoError>;

    /// Update the row matching both `id` and `owner`.
    /// Returns `None` when no row matched.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &IdeaChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Idea>, RepoError>;

    /// Delete the row matching both `id` and `owner`. Returns rows removed.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<u64, RepoError>;
}
