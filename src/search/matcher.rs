//! Fallback name matcher
//!
//! Hits are merged as country cities, then beaches, then temples, each in
//! dataset order. No de-duplication is done; the collections are disjoint.

use super::NormalizedQuery;
use crate::models::{Category, Country, Dataset, SearchResult};

/// A country matches on its own name or on any of its city names
fn country_matches(country: &Country, needle: &str) -> bool {
    country.name.to_lowercase().contains(needle)
        || country.cities.iter().any(|city| city.name_contains(needle))
}

/// Case-insensitive substring search on names across all collections
#[must_use]
pub fn match_by_name(dataset: &Dataset, query: &NormalizedQuery) -> Vec<SearchResult> {
    let needle = query.as_str();
    let mut results = Vec::new();

    for country in dataset.countries.iter().filter(|c| country_matches(c, needle)) {
        results.extend(
            country
                .cities
                .iter()
                .map(|city| SearchResult::tagged(city, Category::Country)),
        );
    }

    results.extend(
        dataset
            .beaches
            .iter()
            .filter(|beach| beach.name_contains(needle))
            .map(|beach| SearchResult::tagged(beach, Category::Beach)),
    );

    results.extend(
        dataset
            .temples
            .iter()
            .filter(|temple| temple.name_contains(needle))
            .map(|temple| SearchResult::tagged(temple, Category::Temple)),
    );

    results
}
