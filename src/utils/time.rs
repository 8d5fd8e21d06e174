//! Timestamp utilities: the form's `DD/MM/YYYY HH:MM:SS` layout and the
//! storage layout used by the SQLite sink.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

/// Layout of the `Timestamp` column written by the form.
pub const FORM_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Layout used when a timestamp is stored as text. Sorts chronologically.
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_form_timestamp(raw: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), FORM_TIMESTAMP_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(raw.to_string()))
}

pub fn format_form_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(FORM_TIMESTAMP_FORMAT).to_string()
}

pub fn format_db_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DB_TIMESTAMP_FORMAT).to_string()
}
