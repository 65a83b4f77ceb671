use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Category, Idea};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Dashboard totals over one owner's ideas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaSummary {
    pub total: usize,
    pub ai_expanded: usize,
    pub categories: Vec<CategoryCount>,
}

/// Categories present in `ideas`, in the fixed category order.
pub fn distinct_categories(ideas: &[Idea]) -> Vec<Category> {
    category_counts(ideas)
        .into_iter()
        .map(|c| c.category)
        .collect()
}

/// Count per category present; absent categories are omitted.
pub fn category_counts(ideas: &[Idea]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for idea in ideas {
        *counts.entry(idea.category).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

pub fn summarize(ideas: &[Idea]) -> IdeaSummary {
    IdeaSummary {
        total: ideas.len(),
        ai_expanded: ideas.iter().filter(|i| i.ai_expanded).count(),
        categories: category_counts(ideas),
    }
}
