//! Data models for the travel recommendation dataset
//!
//! This module contains the core domain models organized by concern:
//! - Destination: items, countries and the dataset as loaded from JSON
//! - Category: the closed set of result categories and tagged search results

pub mod category;
pub mod destination;

// Re-export all public types for convenient access
pub use category::{Category, SearchResult};
pub use destination::{Country, Dataset, DestinationItem};
