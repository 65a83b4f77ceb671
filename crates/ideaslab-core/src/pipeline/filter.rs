use std::convert::Infallible;
use std::str::FromStr;

use crate::domain::Idea;

/// Category constraint of a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Compared case-insensitively against the category label.
    Label(String),
}

impl CategoryFilter {
    pub fn matches(&self, idea: &Idea) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Label(label) => idea.category.as_str().eq_ignore_ascii_case(label.trim()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Label(trimmed.to_string()))
        }
    }
}

/// True when `search` is empty or a case-insensitive substring of the title or description.
pub fn matches_search(idea: &Idea, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    idea.title.to_lowercase().contains(&needle)
        || idea.description.to_lowercase().contains(&needle)
}

/// Keep ideas matching both the search term and the category filter, in input order.
pub fn filter_ideas(ideas: Vec<Idea>, search: &str, category: &CategoryFilter) -> Vec<Idea> {
    ideas
        .into_iter()
        .filter(|idea| matches_search(idea, search) && category.matches(idea))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::pipeline::test_support::idea;

    #[test]
    fn test_no_constraints_is_identity() {
        let ideas = vec![
            idea("Alpha", "first", Category::Health, 3),
            idea("Beta", "second", Category::Business, 1),
        ];
        let filtered = filter_ideas(ideas.clone(), "", &CategoryFilter::All);
        assert_eq!(filtered, ideas);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let one = idea("Smart Home Energy", "Optimizes usage", Category::Technology, 0);

        assert_eq!(filter_ideas(vec![one.clone()], "ENERGY", &CategoryFilter::All).len(), 1);
        assert_eq!(filter_ideas(vec![one.clone()], "usage", &CategoryFilter::All).len(), 1);
        assert!(filter_ideas(vec![one], "finance", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_search_matches_non_ascii_text() {
        let one = idea("可持续智能家居", "能源管理", Category::Technology, 0);
        assert_eq!(filter_ideas(vec![one], "能源", &CategoryFilter::All).len(), 1);
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let ideas = vec![
            idea("Alpha", "a", Category::Health, 0),
            idea("Beta", "b", Category::Business, 0),
        ];
        let health: CategoryFilter = "Health".parse().unwrap();

        let filtered = filter_ideas(ideas, "", &health);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Alpha");
    }

    #[test]
    fn test_unknown_category_label_matches_nothing() {
        let ideas = vec![idea("Alpha", "a", Category::Other, 0)];
        let filter: CategoryFilter = "gardening".parse().unwrap();
        assert!(filter_ideas(ideas, "", &filter).is_empty());
    }

    #[test]
    fn test_all_parses_in_any_case() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    }

    #[test]
    fn test_search_and_category_combine() {
        let ideas = vec![
            idea("Fitness coach", "workouts", Category::Health, 0),
            idea("Fitness marketplace", "gyms", Category::Business, 0),
        ];
        let filtered = filter_ideas(ideas, "fitness", &CategoryFilter::Label("business".into()));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Fitness marketplace");
    }
}
