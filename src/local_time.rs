//! Local time lookup for destination cards

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Weekday, date and 12-hour clock, e.g. `Tue, Oct 16, 2026, 3:04:05 PM`
pub const LOCAL_TIME_FORMAT: &str = "%a, %b %-d, %Y, %-I:%M:%S %p";

/// Format `now` in the given IANA time zone.
///
/// Returns an empty string when the identifier is unknown; the failure is
/// logged and never reaches the caller as an error.
#[must_use]
pub fn format_local_time(time_zone: &str, now: DateTime<Utc>) -> String {
    match time_zone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).format(LOCAL_TIME_FORMAT).to_string(),
        Err(e) => {
            warn!("Error getting time for timezone '{}': {}", time_zone, e);
            String::new()
        }
    }
}
