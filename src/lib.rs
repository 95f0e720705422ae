//! `travelrec` - Keyword search over a curated travel recommendation dataset
//!
//! A dataset of beaches, temples and countries (with their cities) is loaded
//! once, then searched by category keyword or by destination name. Results
//! are rendered as cards for the terminal, an HTML page or a JSON API.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod local_time;
pub mod models;
pub mod presenter;
pub mod search;
pub mod session;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::TravelRecConfig;
pub use error::TravelRecError;
pub use loader::{DatasetHandle, DatasetSource, FileSource, HttpSource, LoadError, LoadState};
pub use models::{Category, Country, Dataset, DestinationItem, SearchResult};
pub use presenter::{Card, Presenter};
pub use search::{NormalizedQuery, search};
pub use session::{Page, SearchOutcome, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelRecError>;
