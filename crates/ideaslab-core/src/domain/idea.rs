use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WriteError;

/// Fixed set of idea categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Education,
    Health,
    Creative,
    Social,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Technology,
        Category::Business,
        Category::Education,
        Category::Health,
        Category::Creative,
        Category::Social,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Education => "education",
            Category::Health => "health",
            Category::Creative => "creative",
            Category::Social => "social",
            Category::Other => "other",
        }
    }

    /// Lenient parse for stored rows: unknown labels fall back to `Other`.
    pub fn from_stored(label: &str) -> Self {
        label.parse().unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Idea entity - one captured idea and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub category: Category,
    /// Comma-separated, stored exactly as entered.
    pub tags: Option<String>,
    pub ai_expanded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` only for legacy rows that predate ownership.
    pub user_id: Option<Uuid>,
}

impl Idea {
    /// Short text for cards: the excerpt when set, otherwise the start of the description.
    pub fn preview(&self, max_chars: usize) -> String {
        if let Some(excerpt) = self.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
            return excerpt.to_string();
        }

        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head.trim_end())
        } else {
            head
        }
    }

    /// Display-only split of `tags`.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_owned_by(&self, owner: Uuid) -> bool {
        self.user_id == Some(owner)
    }
}

/// Client-supplied fields for a new idea.
///
/// There is no owner field: the access layer always stamps the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub category: Category,
    pub tags: Option<String>,
}

impl NewIdea {
    pub fn new(title: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            excerpt: None,
            category,
            tags: None,
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn validate(&self) -> Result<(), WriteError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<String>,
    /// Sets `ai_expanded` to true. Nothing sets it back to false.
    pub mark_ai_expanded: bool,
}

impl IdeaChanges {
    pub fn expanded() -> Self {
        Self {
            mark_ai_expanded: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), WriteError> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(description) = &self.description {
            require("description", description)?;
        }
        Ok(())
    }

    /// Apply onto an existing row; used by stores that edit in place.
    pub fn apply_to(&self, idea: &mut Idea) {
        if let Some(title) = &self.title {
            idea.title = title.clone();
        }
        if let Some(description) = &self.description {
            idea.description = description.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            idea.excerpt = Some(excerpt.clone());
        }
        if let Some(category) = self.category {
            idea.category = category;
        }
        if let Some(tags) = &self.tags {
            idea.tags = Some(tags.clone());
        }
        if self.mark_ai_expanded {
            idea.ai_expanded = true;
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), WriteError> {
    if value.trim().is_empty() {
        Err(WriteError::MissingField(field))
    } else {
        Ok(())
    }
}
