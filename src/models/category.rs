//! Result categories and tagged search results

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::DestinationItem;

/// Category attached to every search result
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Beach,
    Temple,
    Country,
}

impl Category {
    /// Categories in keyword-matching priority order
    pub const PRIORITY: [Category; 3] = [Category::Beach, Category::Temple, Category::Country];

    /// Synonyms that select this whole category when contained in a query
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Beach => &["beach", "beaches", "coast", "coastal", "shore"],
            Category::Temple => &["temple", "temples", "shrine", "shrines"],
            Category::Country => &["country", "countries", "nation", "nations"],
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Beach => "Beach",
            Category::Temple => "Temple",
            Category::Country => "Country",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Category::Beach => "🏖️",
            Category::Temple => "🛕",
            Category::Country => "🏙️",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A copied destination item tagged with the category it was found under
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchResult {
    #[serde(flatten)]
    pub item: DestinationItem,
    pub category: Category,
}

impl SearchResult {
    /// Copy an item out of the dataset and tag it
    #[must_use]
    pub fn tagged(item: &DestinationItem, category: Category) -> Self {
        Self {
            item: item.clone(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            Category::PRIORITY,
            [Category::Beach, Category::Temple, Category::Country]
        );
    }

    #[test]
    fn test_search_result_serializes_flat() {
        let item = DestinationItem::new("Bora Bora", "Lagoon", "bora.jpg");
        let result = SearchResult::tagged(&item, Category::Beach);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["name"], "Bora Bora");
        assert_eq!(value["category"], "Beach");
        assert!(value.get("item").is_none());
    }

    #[test]
    fn test_tagged_is_a_copy() {
        let item = DestinationItem::new("Bora Bora", "Lagoon", "bora.jpg");
        let mut result = SearchResult::tagged(&item, Category::Beach);
        result.item.name.push_str(" (edited)");

        assert_eq!(item.name, "Bora Bora");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Category::Temple.to_string(), "Temple");
    }
}
