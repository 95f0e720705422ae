//! Destination model: the items, countries and the dataset they form

use serde::{Deserialize, Deserializer, Serialize};

use super::Category;

/// A single recommendable place (a beach, a temple or a city)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationItem {
    /// Display name, e.g. "Sydney, Australia"
    pub name: String,
    /// Short description shown on the card
    pub description: String,
    /// Image shown on the card
    pub image_url: String,
    /// IANA time zone identifier used for the local time line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DestinationItem {
    /// Create an item without a time zone
    #[must_use]
    pub fn new(name: &str, description: &str, image_url: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            time_zone: None,
        }
    }

    /// Attach a time zone identifier
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: &str) -> Self {
        self.time_zone = Some(time_zone.to_string());
        self
    }

    /// Case-insensitive substring test against the item name.
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// A country and its recommended cities
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    /// A missing or `null` list reads as no cities
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cities: Vec<DestinationItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DestinationItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DestinationItem>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The full recommendation dataset, read-only after load
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    #[serde(default)]
    pub beaches: Vec<DestinationItem>,
    #[serde(default)]
    pub temples: Vec<DestinationItem>,
    #[serde(default)]
    pub countries: Vec<Country>,
}

impl Dataset {
    /// Parse a dataset from its JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// All cities of all countries, country-then-city order
    pub fn cities(&self) -> impl Iterator<Item = &DestinationItem> {
        self.countries.iter().flat_map(|country| country.cities.iter())
    }

    /// Every item belonging to a category, in dataset order
    pub fn items_in(&self, category: Category) -> Box<dyn Iterator<Item = &DestinationItem> + '_> {
        match category {
            Category::Beach => Box::new(self.beaches.iter()),
            Category::Temple => Box::new(self.temples.iter()),
            Category::Country => Box::new(self.cities()),
        }
    }

    /// Number of beaches, temples and cities
    #[must_use]
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.beaches.len(), self.temples.len(), self.cities().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_dataset;

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{
            "beaches": [{"name": "Shore", "description": "d", "imageUrl": "s.jpg"}],
            "countries": [{"name": "Nowhere"}]
        }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert_eq!(dataset.beaches[0].time_zone, None);
        assert!(dataset.temples.is_empty());
        assert!(dataset.countries[0].cities.is_empty());
    }

    #[test]
    fn test_null_cities_read_as_empty() {
        let json = r#"{
            "countries": [
                {"name": "Nowhere", "cities": null},
                {"name": "Japan", "cities": [{"name": "Tokyo, Japan", "description": "d", "imageUrl": "t.jpg"}]}
            ]
        }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert!(dataset.countries[0].cities.is_empty());
        assert_eq!(dataset.countries[1].cities.len(), 1);
        assert_eq!(dataset.sizes(), (0, 0, 1));
    }

    #[test]
    fn test_camel_case_fields() {
        let item = DestinationItem::new("Kyoto", "Old capital", "kyoto.jpg").with_time_zone("Asia/Tokyo");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["imageUrl"], "kyoto.jpg");
        assert_eq!(value["timeZone"], "Asia/Tokyo");
    }

    #[test]
    fn test_cities_preserve_country_order() {
        let dataset = sample_dataset();
        let names: Vec<&str> = dataset.cities().map(|c| c.name.as_str()).collect();

        assert_eq!(names.first(), Some(&"Sydney, Australia"));
        assert_eq!(names.last(), Some(&"Nice, France"));
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(sample_dataset().sizes(), (2, 2, 8));
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let item = DestinationItem::new("Taj Mahal, India", "", "");
        assert!(item.name_contains("mahal"));
        assert!(!item.name_contains("angkor"));
    }
}
