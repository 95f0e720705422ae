//! Keyword search over the recommendation dataset
//!
//! A query is first checked against the category keyword sets
//! ([`keywords::classify`]). When no set matches, the query falls back to a
//! substring search on names across all collections ([`matcher::match_by_name`]).

pub mod keywords;
pub mod matcher;

use std::fmt::Display;

use tracing::debug;

use crate::models::{Dataset, SearchResult};

pub use keywords::classify;
pub use matcher::match_by_name;

/// A trimmed, lowercased, non-empty query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    /// Normalize raw input. Returns `None` when nothing is left after trimming.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NormalizedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classify the query, falling back to name matching
#[tracing::instrument(level = "debug", skip(dataset, query), fields(query = %query))]
pub fn search(dataset: &Dataset, query: &NormalizedQuery) -> Vec<SearchResult> {
    let results = classify(dataset, query).unwrap_or_else(|| match_by_name(dataset, query));
    debug!("Search produced {} results", results.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::models::fixtures::sample_dataset;
    use rstest::rstest;

    fn run(query: &str) -> Vec<SearchResult> {
        search(&sample_dataset(), &NormalizedQuery::new(query).unwrap())
    }

    #[rstest]
    #[case("  Beaches  ", "beaches")]
    #[case("TEMPLE", "temple")]
    #[case("\tJapan\n", "japan")]
    fn test_normalization(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(NormalizedQuery::new(raw).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn test_empty_query_is_rejected(#[case] raw: &str) {
        assert!(NormalizedQuery::new(raw).is_none());
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(run("zzz_no_match").is_empty());
    }

    #[test]
    fn test_city_name_returns_whole_country() {
        let results = run("paris");
        let names: Vec<&str> = results.iter().map(|r| r.item.name.as_str()).collect();

        assert_eq!(names, vec!["Paris, France", "Nice, France"]);
        assert!(results.iter().all(|r| r.category == Category::Country));
    }

    #[test]
    fn test_keyword_wins_over_names() {
        // "coast" is a beach keyword even though no name contains it
        let results = run("Coast");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.category == Category::Beach));
    }

    #[test]
    fn test_fallback_merges_collections() {
        let results = run("brazil");
        let categories: Vec<Category> = results.iter().map(|r| r.category).collect();

        assert_eq!(
            categories,
            vec![Category::Country, Category::Country, Category::Beach]
        );
        assert_eq!(results[2].item.name, "Copacabana Beach, Brazil");
    }
}
