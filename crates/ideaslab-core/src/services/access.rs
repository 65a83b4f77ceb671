//! Owner-scoped access to the idea store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Idea, IdeaChanges, NewIdea};
use crate::error::{IdeaError, WriteError};
use crate::ports::{IdeaRepository, PubSub};

use super::backfill::{BackfillPolicy, OwnershipBackfill};
use super::changes::{ChangeKind, IDEA_CHANGES_CHANNEL, IdeaChange};

/// The only way application code reads or writes ideas.
///
/// Every method takes the caller explicitly; `None` means no authenticated
/// session. Ownership is enforced here with an explicit owner predicate on
/// each store call, independent of any row-level security in the store.
pub struct IdeaAccess {
    repo: Arc<dyn IdeaRepository>,
    backfill: OwnershipBackfill,
    notifier: Option<Arc<dyn PubSub>>,
}

impl IdeaAccess {
    pub fn new(repo: Arc<dyn IdeaRepository>, policy: BackfillPolicy) -> Self {
        Self {
            repo,
            backfill: OwnershipBackfill::new(policy),
            notifier: None,
        }
    }

    /// Publish an [`IdeaChange`] after every successful mutation.
    pub fn with_notifier(mut self, notifier: Arc<dyn PubSub>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn backfill(&self) -> &OwnershipBackfill {
        &self.backfill
    }

    /// All ideas owned by the caller, newest first.
    ///
    /// Without a caller this returns an empty list and does not query.
    pub async fn list(&self, caller: Option<Uuid>) -> Result<Vec<Idea>, IdeaError> {
        let Some(caller) = caller else {
            tracing::warn!("Listing ideas without an authenticated caller");
            return Ok(Vec::new());
        };

        self.run_backfill(caller).await?;

        let ideas = self.repo.find_owned(caller).await.map_err(IdeaError::read)?;
        tracing::debug!(caller = %caller, count = ideas.len(), "Listed ideas");
        Ok(ideas)
    }

    /// The caller's idea with `id`. Missing and foreign rows both yield `None`.
    pub async fn get_by_id(&self, id: Uuid, caller: Option<Uuid>) -> Result<Option<Idea>, IdeaError> {
        let caller = caller.ok_or(IdeaError::Access)?;

        self.run_backfill(caller).await?;

        self.repo
            .find_owned_by_id(id, caller)
            .await
            .map_err(IdeaError::read)
    }

    pub async fn create(&self, idea: NewIdea, caller: Option<Uuid>) -> Result<Idea, IdeaError> {
        let caller = caller.ok_or(IdeaError::Access)?;
        idea.validate()?;

        let created = self
            .repo
            .insert(caller, idea)
            .await
            .map_err(IdeaError::rejected)?;

        tracing::info!(idea_id = %created.id, caller = %caller, "Idea created");
        self.notify(ChangeKind::Created, created.id, caller).await;
        Ok(created)
    }

    /// Update the caller's idea. `updated_at` is always refreshed.
    pub async fn update(
        &self,
        id: Uuid,
        changes: IdeaChanges,
        caller: Option<Uuid>,
    ) -> Result<Idea, IdeaError> {
        let caller = caller.ok_or(IdeaError::Access)?;
        changes.validate()?;

        let updated = self
            .repo
            .update_owned(id, caller, &changes, Utc::now())
            .await
            .map_err(IdeaError::rejected)?
            .ok_or(WriteError::NoMatchingRow(id))?;

        tracing::info!(
            idea_id = %id,
            caller = %caller,
            ai_expanded = updated.ai_expanded,
            "Idea updated"
        );
        self.notify(ChangeKind::Updated, id, caller).await;
        Ok(updated)
    }

    /// Save changes and mark the idea as AI-expanded.
    pub async fn expand(
        &self,
        id: Uuid,
        changes: IdeaChanges,
        caller: Option<Uuid>,
    ) -> Result<Idea, IdeaError> {
        let changes = IdeaChanges {
            mark_ai_expanded: true,
            ..changes
        };
        self.update(id, changes, caller).await
    }

    /// Delete the caller's idea. Deleting a missing or foreign idea is a no-op.
    pub async fn delete(&self, id: Uuid, caller: Option<Uuid>) -> Result<(), IdeaError> {
        let caller = caller.ok_or(IdeaError::Access)?;

        let removed = self
            .repo
            .delete_owned(id, caller)
            .await
            .map_err(IdeaError::rejected)?;

        if removed == 0 {
            tracing::debug!(idea_id = %id, caller = %caller, "Delete matched no owned idea");
        } else {
            tracing::info!(idea_id = %id, caller = %caller, "Idea deleted");
            self.notify(ChangeKind::Deleted, id, caller).await;
        }
        Ok(())
    }

    async fn run_backfill(&self, caller: Uuid) -> Result<(), IdeaError> {
        let run = self
            .backfill
            .ensure(self.repo.as_ref(), caller)
            .await
            .map_err(IdeaError::read)?;

        if let Some(run) = run {
            for id in run.claimed {
                self.notify(ChangeKind::Claimed, id, run.owner).await;
            }
        }
        Ok(())
    }

    async fn notify(&self, kind: ChangeKind, idea_id: Uuid, owner: Uuid) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        let change = IdeaChange { kind, idea_id, owner };
        let payload = match serde_json::to_string(&change) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode idea change");
                return;
            }
        };

        if let Err(e) = notifier.publish(IDEA_CHANGES_CHANNEL, &payload).await {
            tracing::warn!(error = %e, idea_id = %idea_id, "Failed to publish idea change");
        }
    }
}
