//! Result presentation
//!
//! Turns search results into cards and writes them into the [`Page`]
//! regions. The [`html`] and [`text`] renderers then turn a page into
//! something a browser or a terminal can show.

pub mod html;
pub mod text;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::PresentationConfig;
use crate::local_time::format_local_time;
use crate::models::{Category, SearchResult};
use crate::session::{Page, Severity, StatusMessage};

/// Label of the call-to-action on every card
pub const VISIT_LABEL: &str = "Visit";

/// One rendered search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Shown when `image_url` fails to load
    pub fallback_image_url: String,
    pub category: Category,
    /// Current local time at the destination, when it has a valid time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    pub action_label: String,
}

/// Builds cards and status messages with the configured presentation settings
#[derive(Debug, Clone)]
pub struct Presenter {
    placeholder_image_url: String,
    message_ttl: Duration,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::from_config(&PresentationConfig::default())
    }
}

impl Presenter {
    #[must_use]
    pub fn from_config(config: &PresentationConfig) -> Self {
        Self {
            placeholder_image_url: config.placeholder_image_url.clone(),
            message_ttl: Duration::from_secs(config.message_seconds.into()),
        }
    }

    /// Build the card for one result. The local time line is only present
    /// when the item carries a time zone that resolves.
    #[must_use]
    pub fn card(&self, result: &SearchResult, now: DateTime<Utc>) -> Card {
        let local_time = result
            .item
            .time_zone
            .as_deref()
            .map(|zone| format_local_time(zone, now))
            .filter(|time| !time.is_empty());

        Card {
            name: result.item.name.clone(),
            description: result.item.description.clone(),
            image_url: result.item.image_url.clone(),
            fallback_image_url: self.placeholder_image_url.clone(),
            category: result.category,
            local_time,
            action_label: VISIT_LABEL.to_string(),
        }
    }

    /// Render results into the page.
    ///
    /// An empty list leaves the page untouched. Otherwise the landing view is
    /// hidden, the results section shown, prior cards replaced in input
    /// order and a smooth scroll to the results requested. Missing regions
    /// are skipped.
    pub fn render(&self, page: &mut Page, results: &[SearchResult], now: DateTime<Utc>) {
        if results.is_empty() {
            return;
        }
        let Some(container) = page.results_container.as_mut() else {
            debug!("No results container on page, skipping render");
            return;
        };

        container.cards = results.iter().map(|result| self.card(result, now)).collect();

        if let Some(hero) = page.hero.as_mut() {
            hero.visible = false;
        }
        if let Some(section) = page.results_section.as_mut() {
            section.visible = true;
            section.scroll_requested = true;
        }

        debug!("Rendered {} cards", results.len());
    }

    /// Show a message that expires after the configured lifetime
    pub fn show_message(&self, page: &mut Page, text: &str, severity: Severity, now: DateTime<Utc>) {
        page.show_message(StatusMessage::new(text, severity, now, Some(self.message_ttl)));
    }

    /// Show a message that stays until the page is reloaded or cleared
    pub fn show_persistent_message(
        &self,
        page: &mut Page,
        text: &str,
        severity: Severity,
        now: DateTime<Utc>,
    ) {
        page.show_message(StatusMessage::new(text, severity, now, None));
    }
}
