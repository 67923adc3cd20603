//! Utility functions for vaultpress

use chrono::{DateTime, NaiveDate};

/// Formats front matter date for display.
///
/// Accepts `YYYY-MM-DD` dates and RFC 3339 timestamps and renders them as
/// day, full month name and year ("15 January 2023"). Other values are
/// returned verbatim, trimmed.
///
/// # Arguments
///
/// * `raw`: Date as written in the note front matter
///
/// # Returns
///
/// Human readable date string
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
