//! In-memory idea store - used when no database is configured.
//!
//! Works within a single process only. Data is lost on restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use ideaslab_core::domain::{Idea, IdeaChanges, NewIdea};
use ideaslab_core::error::RepoError;
use ideaslab_core::ports::IdeaRepository;

#[derive(Default)]
pub struct InMemoryIdeaRepository {
    rows: RwLock<Vec<Idea>>,
}

impl InMemoryIdeaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as-is, bypassing ownership. For seeding legacy data.
    pub async fn insert_raw(&self, idea: Idea) {
        self.rows.write().await.push(idea);
    }

    /// Every stored row regardless of owner.
    pub async fn snapshot(&self) -> Vec<Idea> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepository {
    async fn find_owned(&self, owner: Uuid) -> Result<Vec<Idea>, RepoError> {
        let rows = self.rows.read().await;
        let mut owned: Vec<Idea> = rows.iter().filter(|i| i.is_owned_by(owner)).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_owned_by_id(&self, id: Uuid, owner: Uuid) -> Result<Option<Idea>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|i| i.id == id && i.is_owned_by(owner))
            .cloned())
    }

    async fn find_unowned_ids(&self) -> Result<Vec<Uuid>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|i| i.user_id.is_none())
            .map(|i| i.id)
            .collect())
    }

    async fn claim_unowned(&self, id: Uuid, owner: Uuid) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|i| i.id == id && i.user_id.is_none()) {
            Some(row) => {
                row.user_id = Some(owner);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert(&self, owner: Uuid, new_idea: NewIdea) -> Result<Idea, RepoError> {
        let now = Utc::now();
        let idea = Idea {
            id: Uuid::new_v4(),
            title: new_idea.title,
            description: new_idea.description,
            excerpt: new_idea.excerpt,
            category: new_idea.category,
            tags: new_idea.tags,
            ai_expanded: false,
            created_at: now,
            updated_at: now,
            user_id: Some(owner),
        };

        self.rows.write().await.push(idea.clone());
        Ok(idea)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &IdeaChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Idea>, RepoError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|i| i.id == id && i.is_owned_by(owner)) else {
            return Ok(None);
        };

        changes.apply_to(row);
        row.updated_at = updated_at;
        row.user_id = Some(owner);
        Ok(Some(row.clone()))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|i| !(i.id == id && i.is_owned_by(owner)));
        Ok((before - rows.len()) as u64)
    }
}
