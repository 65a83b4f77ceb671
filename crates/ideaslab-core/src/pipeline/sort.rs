use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Idea;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
}

impl FromStr for SortOrder {
    type Err = Infallible;

    /// Unknown values fall back to `Newest`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let order = match s.trim().to_ascii_lowercase().as_str() {
            "oldest" => SortOrder::Oldest,
            "alphabetical" => SortOrder::Alphabetical,
            _ => SortOrder::Newest,
        };
        Ok(order)
    }
}

/// Stable in-place sort; ties keep their input order.
pub fn sort_ideas(ideas: &mut [Idea], order: SortOrder) {
    match order {
        SortOrder::Newest => ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => ideas.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Alphabetical => ideas.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Case-insensitive title order; titles equal after folding put lowercase first.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::pipeline::test_support::idea;

    fn titles(ideas: &[Idea]) -> Vec<&str> {
        ideas.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_newest_reversed_equals_oldest() {
        let ideas = vec![
            idea("b", "", Category::Other, 5),
            idea("a", "", Category::Other, 1),
            idea("c", "", Category::Other, 9),
        ];

        let mut newest = ideas.clone();
        sort_ideas(&mut newest, SortOrder::Newest);
        let mut oldest = ideas;
        sort_ideas(&mut oldest, SortOrder::Oldest);

        assert_eq!(titles(&newest), vec!["a", "b", "c"]);
        newest.reverse();
        assert_eq!(newest, oldest);
    }

    #[test]
    fn test_alphabetical_ignores_case() {
        let mut ideas = vec![
            idea("banana", "", Category::Other, 0),
            idea("Cherry", "", Category::Other, 0),
            idea("apple", "", Category::Other, 0),
        ];
        sort_ideas(&mut ideas, SortOrder::Alphabetical);
        assert_eq!(titles(&ideas), vec!["apple", "banana", "Cherry"]);
    }

    #[test]
    fn test_alphabetical_puts_lowercase_first_on_folded_ties() {
        let mut ideas = vec![
            idea("Apple", "", Category::Other, 0),
            idea("apple", "", Category::Other, 0),
            idea("Zebra", "", Category::Other, 0),
        ];
        sort_ideas(&mut ideas, SortOrder::Alphabetical);
        assert_eq!(titles(&ideas), vec!["apple", "Apple", "Zebra"]);
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut ideas = vec![
            idea("second", "", Category::Other, 2),
            idea("first", "", Category::Other, 2),
        ];
        ideas[1].created_at = ideas[0].created_at;
        sort_ideas(&mut ideas, SortOrder::Newest);
        assert_eq!(titles(&ideas), vec!["second", "first"]);
    }

    #[test]
    fn test_parse_falls_back_to_newest() {
        assert_eq!("Oldest".parse::<SortOrder>().unwrap(), SortOrder::Oldest);
        assert_eq!("alphabetical".parse::<SortOrder>().unwrap(), SortOrder::Alphabetical);
        assert_eq!("random".parse::<SortOrder>().unwrap(), SortOrder::Newest);
    }
}
