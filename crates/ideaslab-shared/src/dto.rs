//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to capture a new idea.
///
/// Any owner supplied by the client is ignored; unknown fields are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Option<String>,
}

/// Partial update; omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    /// Only `true` has an effect.
    #[serde(default)]
    pub ai_expanded: Option<bool>,
}

/// Query string of the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListIdeasParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Full idea, as shown on the detail and edit pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub tags: Option<String>,
    pub tag_list: Vec<String>,
    pub ai_expanded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Card in a list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaCardResponse {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub ai_expanded: bool,
    /// Relative label such as "3 days ago".
    pub date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCountResponse {
    pub category: String,
    pub count: usize,
}

/// Dashboard numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaSummaryResponse {
    pub total: usize,
    pub ai_expanded: usize,
    pub categories: Vec<CategoryCountResponse>,
}
