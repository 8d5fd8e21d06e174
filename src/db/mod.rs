//! Persistence sink for `nappy_log`.
//!
//! The connection string picks the backend: `postgres://` or `postgresql://`
//! URLs go to PostgreSQL, anything else is treated as a SQLite file path.
//! The connection lives inside the store and is closed when it is dropped.

pub mod pg;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::LogEntry;
use chrono::NaiveDateTime;

pub const TABLE: &str = "nappy_log";

pub trait LogStore {
    /// Backend name for console output.
    fn backend(&self) -> &'static str;

    /// Create `nappy_log` if it does not exist yet.
    fn ensure_schema(&mut self) -> AppResult<()>;

    /// Latest stored timestamp, `None` when the table is empty.
    fn watermark(&mut self) -> AppResult<Option<NaiveDateTime>>;

    /// Insert-or-ignore keyed on `timestamp`. Returns `false` when a row with
    /// the same timestamp already existed.
    fn insert_if_absent(&mut self, entry: &LogEntry) -> AppResult<bool>;

    fn count(&mut self) -> AppResult<i64>;
}

/// Backend selected from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend<'a> {
    Postgres(&'a str),
    Sqlite(&'a str),
}

pub fn backend_for(url: &str) -> Backend<'_> {
    let url = url.trim();
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Backend::Postgres(url)
    } else if let Some(path) = url.strip_prefix("sqlite://") {
        Backend::Sqlite(path)
    } else if let Some(path) = url.strip_prefix("sqlite:") {
        Backend::Sqlite(path)
    } else {
        Backend::Sqlite(url)
    }
}

/// Open the sink. With `create` false a missing SQLite file is an error
/// instead of being silently created.
pub fn open_store(url: &str, create: bool) -> AppResult<Box<dyn LogStore>> {
    match backend_for(url) {
        Backend::Postgres(url) => Ok(Box::new(pg::PgStore::connect(url)?)),
        Backend::Sqlite(path) => Ok(Box::new(sqlite::SqliteStore::open(path, create)?)),
    }
}
