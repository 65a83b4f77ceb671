//! PostgreSQL idea repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use ideaslab_core::domain::{Idea, IdeaChanges, NewIdea};
use ideaslab_core::error::RepoError;
use ideaslab_core::ports::IdeaRepository;

use super::entity::idea::{self, Entity as IdeaEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL idea repository.
pub type PostgresIdeaRepository = PostgresBaseRepository<IdeaEntity>;

#[async_trait]
impl IdeaRepository for PostgresIdeaRepository {
    async fn find_owned(&self, owner: Uuid) -> Result<Vec<Idea>, RepoError> {
        let rows = IdeaEntity::find()
            .filter(idea::Column::UserId.eq(owner))
            .order_by_desc(idea::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_owned_by_id(&self, id: Uuid, owner: Uuid) -> Result<Option<Idea>, RepoError> {
        let row = IdeaEntity::find()
            .filter(idea::Column::Id.eq(id))
            .filter(idea::Column::UserId.eq(owner))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn find_unowned_ids(&self) -> Result<Vec<Uuid>, RepoError> {
        let rows = IdeaEntity::find()
            .filter(idea::Column::UserId.is_null())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn claim_unowned(&self, id: Uuid, owner: Uuid) -> Result<bool, RepoError> {
        let result = IdeaEntity::update_many()
            .col_expr(idea::Column::UserId, Expr::value(owner))
            .filter(idea::Column::Id.eq(id))
            .filter(idea::Column::UserId.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn insert(&self, owner: Uuid, new_idea: NewIdea) -> Result<Idea, RepoError> {
        let now = Utc::now().fixed_offset();
        let model = idea::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_idea.title),
            description: Set(new_idea.description),
            excerpt: Set(new_idea.excerpt),
            category: Set(new_idea.category.as_str().to_string()),
            tags: Set(new_idea.tags),
            ai_expanded: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            user_id: Set(Some(owner)),
        };

        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(idea_id = %inserted.id, "Inserted idea row");
        Ok(inserted.into())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &IdeaChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Idea>, RepoError> {
        let mut query = IdeaEntity::update_many()
            .col_expr(idea::Column::UpdatedAt, Expr::value(updated_at.fixed_offset()))
            .col_expr(idea::Column::UserId, Expr::value(owner));

        if let Some(title) = &changes.title {
            query = query.col_expr(idea::Column::Title, Expr::value(title.clone()));
        }
        if let Some(description) = &changes.description {
            query = query.col_expr(idea::Column::Description, Expr::value(description.clone()));
        }
        if let Some(excerpt) = &changes.excerpt {
            query = query.col_expr(idea::Column::Excerpt, Expr::value(excerpt.clone()));
        }
        if let Some(category) = changes.category {
            query = query.col_expr(idea::Column::Category, Expr::value(category.as_str()));
        }
        if let Some(tags) = &changes.tags {
            query = query.col_expr(idea::Column::Tags, Expr::value(tags.clone()));
        }
        if changes.mark_ai_expanded {
            query = query.col_expr(idea::Column::AiExpanded, Expr::value(true));
        }

        let rows = query
            .filter(idea::Column::Id.eq(id))
            .filter(idea::Column::UserId.eq(owner))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<u64, RepoError> {
        let result = IdeaEntity::delete_many()
            .filter(idea::Column::Id.eq(id))
            .filter(idea::Column::UserId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
