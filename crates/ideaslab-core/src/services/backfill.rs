//! One-time ownership migration for legacy rows.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::RepoError;
use crate::ports::IdeaRepository;

/// Who receives rows that predate the ownership column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackfillPolicy {
    /// First authenticated caller to touch the store takes every orphan.
    #[default]
    ClaimByFirstCaller,
    /// Orphans always go to this owner.
    AssignTo(Uuid),
    /// Orphans stay unowned and invisible.
    Disabled,
}

/// Result of a backfill pass that actually ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillRun {
    pub owner: Uuid,
    pub claimed: Vec<Uuid>,
}

/// Guard that completes the legacy-row migration at most once per process.
///
/// Concurrent callers wait on the same lock, so only one pass scans and
/// claims. A pass that fails is not marked complete and runs again on the
/// next call; rows it already claimed are no longer unowned.
pub struct OwnershipBackfill {
    policy: BackfillPolicy,
    /// Held for the whole scan-and-claim pass.
    pass: Mutex<()>,
    completed: AtomicBool,
}

impl OwnershipBackfill {
    pub fn new(policy: BackfillPolicy) -> Self {
        Self {
            policy,
            pass: Mutex::new(()),
            completed: AtomicBool::new(matches!(policy, BackfillPolicy::Disabled)),
        }
    }

    pub fn policy(&self) -> BackfillPolicy {
        self.policy
    }

    /// Never waits on a pass in progress.
    pub fn is_complete(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    fn target_owner(&self, caller: Uuid) -> Option<Uuid> {
        match self.policy {
            BackfillPolicy::ClaimByFirstCaller => Some(caller),
            BackfillPolicy::AssignTo(owner) => Some(owner),
            BackfillPolicy::Disabled => None,
        }
    }

    /// Run the migration unless it already completed.
    ///
    /// Returns `None` when nothing ran.
    pub async fn ensure(
        &self,
        repo: &dyn IdeaRepository,
        caller: Uuid,
    ) -> Result<Option<BackfillRun>, RepoError> {
        if self.is_complete() {
            return Ok(None);
        }
        let _pass = self.pass.lock().await;
        if self.is_complete() {
            return Ok(None);
        }
        let Some(owner) = self.target_owner(caller) else {
            self.completed.store(true, Ordering::Release);
            return Ok(None);
        };

        let orphans = repo.find_unowned_ids().await?;
        let mut claimed = Vec::with_capacity(orphans.len());
        for id in orphans {
            if repo.claim_unowned(id, owner).await? {
                claimed.push(id);
            } else {
                tracing::debug!(idea_id = %id, "Legacy idea already claimed elsewhere");
            }
        }

        if claimed.is_empty() {
            tracing::debug!("No legacy ideas to backfill");
        } else {
            tracing::warn!(
                owner = %owner,
                claimed = claimed.len(),
                policy = ?self.policy,
                "Assigned legacy ideas without an owner"
            );
        }

        self.completed.store(true, Ordering::Release);
        Ok(Some(BackfillRun { owner, claimed }))
    }
}
