//! List pipeline - filter, sort and aggregate ideas for display.
//!
//! Everything here is pure and synchronous; list views call it on every
//! refresh instead of keeping derived state.

mod filter;
mod relative;
mod sort;
mod summary;

pub use filter::{CategoryFilter, filter_ideas, matches_search};
pub use relative::{RelativeDate, elapsed_days, relative_date};
pub use sort::{SortOrder, sort_ideas};
pub use summary::{CategoryCount, IdeaSummary, category_counts, distinct_categories, summarize};

use crate::domain::Idea;

/// Parameters of a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

/// Filter, then sort.
pub fn apply(ideas: Vec<Idea>, query: &ListQuery) -> Vec<Idea> {
    let mut ideas = filter_ideas(ideas, &query.search, &query.category);
    sort_ideas(&mut ideas, query.sort);
    ideas
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use crate::domain::{Category, Idea};

    pub fn idea(title: &str, description: &str, category: Category, days_ago: i64) -> Idea {
        let base = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
        let created = base - Duration::days(days_ago);
        Idea {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            excerpt: None,
            category,
            tags: None,
            ai_expanded: false,
            created_at: created,
            updated_at: created,
            user_id: Some(Uuid::nil()),
        }
    }
}
