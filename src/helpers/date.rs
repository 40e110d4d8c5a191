//! Date helper functions

use chrono::NaiveDateTime;

/// Format a date in full format (like "January 5, 2024")
pub fn full_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date as `YYYY-MM-DD`
pub fn short_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date in W3C datetime form (UTC), as used in sitemaps
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}
