//! Plain-text rendering of the feedback list.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use feedback_core::FeedbackRecord;

const TIMESTAMP_FORMAT: &str = "%d %b %Y, %I:%M %p";

/// Formats epoch milliseconds in `tz`; out-of-range values are shown raw.
pub fn format_timestamp<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(utc) => utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => epoch_ms.to_string(),
    }
}

pub fn render_record<Tz>(record: &FeedbackRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} ({})  {}\n  {}",
        record.name,
        record.email,
        format_timestamp(record.created_at, tz),
        record.message
    )
}

pub fn render_list<Tz>(records: &[FeedbackRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if records.is_empty() {
        return "All Feedbacks\n\nNo feedback yet.".to_string();
    }

    let body = records
        .iter()
        .map(|record| render_record(record, tz))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("All Feedbacks\n\n{body}")
}
