//! Category keyword classifier

use tracing::debug;

use super::NormalizedQuery;
use crate::models::{Category, Dataset, SearchResult};

/// First category (in priority order) whose keyword set the query contains
#[must_use]
pub fn matching_category(query: &NormalizedQuery) -> Option<Category> {
    Category::PRIORITY.into_iter().find(|category| {
        category
            .keywords()
            .iter()
            .any(|keyword| query.as_str().contains(keyword))
    })
}

/// Return the whole category selected by a keyword, or `None` when the
/// query contains no category keyword
pub fn classify(dataset: &Dataset, query: &NormalizedQuery) -> Option<Vec<SearchResult>> {
    let category = matching_category(query)?;
    debug!("Query '{}' selected category {}", query, category);

    Some(
        dataset
            .items_in(category)
            .map(|item| SearchResult::tagged(item, category))
            .collect(),
    )
}
