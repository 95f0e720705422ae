//! Session and page state
//!
//! A [`Page`] holds the view regions the presenter writes into. Every region
//! is optional; operations on a missing region are silent no-ops. A
//! [`Session`] ties a page to the shared dataset and implements the search
//! and clear flows.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::loader::{DatasetHandle, LoadState};
use crate::presenter::{Card, Presenter};
use crate::search::{NormalizedQuery, search};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid search query.";
pub const STILL_LOADING_MESSAGE: &str = "Travel data is still loading. Please try again.";
pub const LOAD_FAILED_MESSAGE: &str =
    "Error loading travel recommendations. Please refresh the page.";

#[must_use]
pub fn no_results_message(query: &NormalizedQuery) -> String {
    format!(
        "No recommendations found for \"{query}\". Try searching for beaches, temples, or countries."
    )
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
}

impl Severity {
    #[must_use]
    pub fn background_color(self) -> &'static str {
        match self {
            Severity::Error => "rgba(231, 76, 60, 0.9)",
            Severity::Info => "rgba(46, 204, 113, 0.9)",
        }
    }
}

/// A transient (or, with no ttl, persistent) banner message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub shown_at: DateTime<Utc>,
    /// `None` keeps the message until it is replaced or hidden
    #[serde(skip)]
    pub ttl: Option<Duration>,
}

impl StatusMessage {
    #[must_use]
    pub fn new(text: &str, severity: Severity, shown_at: DateTime<Utc>, ttl: Option<Duration>) -> Self {
        Self {
            text: text.to_string(),
            severity,
            shown_at,
            ttl,
        }
    }

    /// Time left before auto-dismiss; `None` for persistent messages
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let ttl = self.ttl?;
        let elapsed = (now - self.shown_at).to_std().unwrap_or(Duration::ZERO);
        Some(ttl.saturating_sub(elapsed))
    }

    #[must_use]
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).is_none_or(|left| !left.is_zero())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub value: String,
}

/// The landing ("hero") view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsSection {
    pub visible: bool,
    /// Set by the presenter; renderers scroll the section into view smoothly
    pub scroll_requested: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsContainer {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBanner {
    pub current: Option<StatusMessage>,
}

impl MessageBanner {
    /// The message, if one is showing and has not expired at `now`
    #[must_use]
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.current.as_ref().filter(|message| message.is_visible_at(now))
    }
}

/// Which view the page currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    Landing,
    Results,
}

/// View regions of the search page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub search_input: Option<SearchInput>,
    pub hero: Option<Hero>,
    pub results_section: Option<ResultsSection>,
    pub results_container: Option<ResultsContainer>,
    pub message: Option<MessageBanner>,
}

impl Default for Page {
    /// All regions present, landing view showing
    fn default() -> Self {
        Self {
            search_input: Some(SearchInput::default()),
            hero: Some(Hero { visible: true }),
            results_section: Some(ResultsSection::default()),
            results_container: Some(ResultsContainer::default()),
            message: Some(MessageBanner::default()),
        }
    }
}

impl Page {
    /// All regions present, landing view showing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with no regions at all
    #[must_use]
    pub fn bare() -> Self {
        Self {
            search_input: None,
            hero: None,
            results_section: None,
            results_container: None,
            message: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        match &self.results_section {
            Some(section) if section.visible => View::Results,
            _ => View::Landing,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.results_container
            .as_ref()
            .map_or(&[], |container| container.cards.as_slice())
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.search_input.as_ref().map_or("", |input| input.value.as_str())
    }

    #[must_use]
    pub fn visible_message(&self, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.message.as_ref().and_then(|banner| banner.visible(now))
    }

    pub fn show_message(&mut self, message: StatusMessage) {
        if let Some(banner) = self.message.as_mut() {
            banner.current = Some(message);
        }
    }

    pub fn hide_message(&mut self) {
        if let Some(banner) = self.message.as_mut() {
            banner.current = None;
        }
    }

    /// Reset to the landing view with an empty input and no message
    pub fn clear(&mut self) {
        if let Some(input) = self.search_input.as_mut() {
            input.value.clear();
        }
        if let Some(section) = self.results_section.as_mut() {
            section.visible = false;
            section.scroll_requested = false;
        }
        if let Some(hero) = self.hero.as_mut() {
            hero.visible = true;
        }
        if let Some(container) = self.results_container.as_mut() {
            container.cards.clear();
        }
        self.hide_message();
    }
}

/// What a submitted query led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing left after trimming
    EmptyQuery,
    /// Dataset not published yet (or its load failed)
    StillLoading,
    NoResults,
    Results(usize),
}

/// One user's search page bound to the shared dataset
#[derive(Debug, Clone)]
pub struct Session {
    page: Page,
    dataset: DatasetHandle,
    presenter: Presenter,
}

impl Session {
    #[must_use]
    pub fn new(dataset: DatasetHandle, presenter: Presenter) -> Self {
        Self {
            page: Page::default(),
            dataset,
            presenter,
        }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Run the search flow for raw user input
    #[tracing::instrument(level = "debug", skip(self, now))]
    pub fn submit(&mut self, raw_query: &str, now: DateTime<Utc>) -> SearchOutcome {
        if let Some(input) = self.page.search_input.as_mut() {
            input.value = raw_query.to_string();
        }

        let Some(query) = NormalizedQuery::new(raw_query) else {
            self.presenter
                .show_message(&mut self.page, EMPTY_QUERY_MESSAGE, Severity::Error, now);
            return SearchOutcome::EmptyQuery;
        };

        let Some(dataset) = self.dataset.get() else {
            self.presenter
                .show_message(&mut self.page, STILL_LOADING_MESSAGE, Severity::Error, now);
            return SearchOutcome::StillLoading;
        };

        self.page.hide_message();
        let results = search(&dataset, &query);

        if results.is_empty() {
            info!("No recommendations for '{}'", query);
            self.presenter.show_message(
                &mut self.page,
                &no_results_message(&query),
                Severity::Info,
                now,
            );
            SearchOutcome::NoResults
        } else {
            self.presenter.render(&mut self.page, &results, now);
            SearchOutcome::Results(results.len())
        }
    }

    /// Reset the page; safe to call repeatedly
    pub fn clear(&mut self) {
        debug!("Clearing search page");
        self.page.clear();
    }

    /// Surface a failed dataset load as a persistent error. Returns whether
    /// the load has failed.
    pub fn report_load_failure(&mut self, now: DateTime<Utc>) -> bool {
        if let LoadState::Failed(_) = self.dataset.state() {
            self.presenter
                .show_persistent_message(&mut self.page, LOAD_FAILED_MESSAGE, Severity::Error, now);
            true
        } else {
            false
        }
    }
}
