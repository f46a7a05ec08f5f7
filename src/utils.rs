// Utility functions
use chrono::{DateTime, Utc};

/// Converts epoch milliseconds into `DateTime<Utc>`, if representable.
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Short calendar date, or a dash when unknown.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
