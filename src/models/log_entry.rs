use super::FormRow;
use crate::utils::time::format_db_timestamp;
use chrono::NaiveDateTime;

/// A row of `nappy_log`. `timestamp` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime, // ⇔ nappy_log.timestamp (UNIQUE)
    pub date: String,             // ⇔ nappy_log.date, raw form text
    pub time: String,             // ⇔ nappy_log.time, raw form text
    pub nappy: String,            // ⇔ nappy_log.nappy
    pub email_address: String,    // ⇔ nappy_log.email_address
    /// Timestamp cell exactly as the sheet rendered it.
    pub raw_timestamp: String,
}

impl LogEntry {
    /// Pair a form row with the timestamp already parsed from it.
    pub fn from_row(row: &FormRow, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            date: row.date.clone(),
            time: row.time.clone(),
            nappy: row.nappy.clone(),
            email_address: row.email_address.clone(),
            raw_timestamp: row.timestamp.clone(),
        }
    }

    /// Timestamp rendered the way the SQLite store keeps it.
    pub fn db_timestamp(&self) -> String {
        format_db_timestamp(&self.timestamp)
    }
}
