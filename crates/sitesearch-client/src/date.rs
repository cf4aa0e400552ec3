//! Publish date parsing and display.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO-8601 date or date-time. Values without an offset are UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort key of a publish date in milliseconds; missing or invalid dates
/// count as the epoch.
pub fn sort_key(value: Option<&str>) -> i64 {
    value
        .and_then(parse_timestamp)
        .map_or(0, |dt| dt.timestamp_millis())
}

/// Long-form date in `locale`, e.g. `1 Januari 2024` for `id_ID`.
/// Missing or invalid dates render as an empty string.
pub fn format_display_date(value: Option<&str>, locale: Locale) -> String {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format_localized("%-d %B %Y", locale).to_string())
        .unwrap_or_default()
}
