//! HTML rendering of the search page

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::Card;
use crate::session::{Page, StatusMessage};

/// Escape text for use in element content and quoted attributes
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one result card
#[must_use]
pub fn card(card: &Card) -> String {
    let time_line = card
        .local_time
        .as_deref()
        .map(|time| format!(r#"<p class="result-time">⏰ Current local time: {}</p>"#, escape(time)))
        .unwrap_or_default();

    format!(
        r#"<div class="result-card" data-category="{category}">
  <img src="{image}" alt="{name}" class="result-image" data-fallback="{fallback}" onerror="this.onerror=null;this.src=this.dataset.fallback">
  <div class="result-content">
    <h2 class="result-title">{name}</h2>
    <p class="result-description">{description}</p>
    {time_line}
    <button class="btn btn-visit">{action}</button>
  </div>
</div>"#,
        category = card.category,
        image = escape(&card.image_url),
        fallback = escape(&card.fallback_image_url),
        name = escape(&card.name),
        description = escape(&card.description),
        action = escape(&card.action_label),
    )
}

fn banner(message: &StatusMessage, now: DateTime<Utc>) -> String {
    let dismiss = message
        .remaining(now)
        .map(|left| {
            format!(
                r#"<script>setTimeout(function () {{ document.querySelector('.search-message').classList.remove('show'); }}, {});</script>"#,
                left.as_millis()
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="search-message show" style="background-color: {color}">{text}</div>{dismiss}"#,
        color = message.severity.background_color(),
        text = escape(&message.text),
    )
}

/// Render the whole page as it stands at `now`
#[must_use]
pub fn page(page: &Page, now: DateTime<Utc>) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<header class="navbar">
  <form class="search" method="get" action="/">"#
    );
    if let Some(input) = &page.search_input {
        let _ = write!(
            body,
            r#"
    <input id="searchInput" name="q" type="text" value="{}" placeholder="Search beaches, temples or countries">"#,
            escape(&input.value)
        );
    }
    body.push_str(
        r#"
    <button id="searchBtn" class="btn" type="submit">Search</button>
    <a id="clearBtn" class="btn" href="/?clear=1">Clear</a>
  </form>
</header>
"#,
    );

    if let Some(message) = page.visible_message(now) {
        body.push_str(&banner(message, now));
        body.push('\n');
    }

    if let Some(hero) = &page.hero {
        let display = if hero.visible { "flex" } else { "none" };
        let _ = writeln!(
            body,
            r#"<section class="hero" style="display: {display}">
  <h1>Explore Dream Destinations</h1>
  <p>Search for beaches, temples or countries to find your next trip.</p>
</section>"#
        );
    }

    if let Some(section) = &page.results_section {
        let class = if section.visible { "results show" } else { "results" };
        let _ = writeln!(body, r#"<section id="resultsSection" class="{class}">"#);
        if let Some(container) = &page.results_container {
            body.push_str(r#"<div id="resultsContainer">"#);
            for c in &container.cards {
                body.push_str(&card(c));
            }
            body.push_str("</div>\n");
        }
        body.push_str("</section>\n");

        if section.scroll_requested {
            body.push_str(
                "<script>document.getElementById('resultsSection').scrollIntoView({ behavior: 'smooth' });</script>\n",
            );
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Travel Recommendations</title>
<link rel="stylesheet" href="/styles.css">
</head>
<body>
{body}</body>
</html>
"#
    )
}
