//! Idea entity for SeaORM.

use sea_orm::entity::prelude::*;

use ideaslab_core::domain::{Category, Idea};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ideas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub tags: Option<String>,
    pub ai_expanded: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// Nullable for rows created before ownership existed.
    pub user_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Idea.
impl From<Model> for Idea {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            excerpt: model.excerpt,
            category: Category::from_stored(&model.category),
            tags: model.tags,
            ai_expanded: model.ai_expanded,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            user_id: model.user_id,
        }
    }
}
