//! Plain-text rendering for the terminal

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::Card;
use crate::session::{Page, Severity, View};

/// Render one card as an indented block
#[must_use]
pub fn card(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}  [{}]", card.category.icon(), card.name, card.category);
    let _ = writeln!(out, "   {}", card.description);
    if let Some(time) = &card.local_time {
        let _ = writeln!(out, "   ⏰ Current local time: {time}");
    }
    let _ = writeln!(out, "   🖼️ {}", card.image_url);
    out
}

/// Render the visible message and, in the results view, every card
#[must_use]
pub fn page(page: &Page, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    if let Some(message) = page.visible_message(now) {
        let marker = match message.severity {
            Severity::Error => "✖",
            Severity::Info => "ℹ",
        };
        let _ = writeln!(out, "{marker} {}", message.text);
    }

    if page.view() == View::Results {
        let cards = page.cards();
        let _ = writeln!(out, "Found {} recommendation(s):\n", cards.len());
        for c in cards {
            out.push_str(&card(c));
            out.push('\n');
        }
    }

    out
}
