//! SQLite sink. Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text so that
//! `MAX()` and the UNIQUE constraint both work on the text value.

use super::LogStore;
use crate::errors::{AppError, AppResult};
use crate::models::LogEntry;
use crate::utils::time::DB_TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OpenFlags, params};
use std::path::Path;

pub struct SqliteStore {
    pub conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str, create: bool) -> AppResult<Self> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if create {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        let conn = Connection::open_with_flags(Path::new(path), flags)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}

fn parse_stored(raw: String) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&raw, DB_TIMESTAMP_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(raw.clone())),
        )
    })
}

impl LogStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn ensure_schema(&mut self) -> AppResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS nappy_log (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp      TEXT NOT NULL UNIQUE,
                date           TEXT NOT NULL DEFAULT '',
                time           TEXT NOT NULL DEFAULT '',
                nappy          TEXT NOT NULL DEFAULT '',
                email_address  TEXT NOT NULL DEFAULT ''
            );
            "#,
        )?;
        Ok(())
    }

    fn watermark(&mut self) -> AppResult<Option<NaiveDateTime>> {
        let raw: Option<String> =
            self.conn
                .query_row("SELECT MAX(timestamp) FROM nappy_log", [], |row| row.get(0))?;
        Ok(raw.map(parse_stored).transpose()?)
    }

    fn insert_if_absent(&mut self, entry: &LogEntry) -> AppResult<bool> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO nappy_log (timestamp, date, time, nappy, email_address)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (timestamp) DO NOTHING",
        )?;
        let changed = stmt.execute(params![
            entry.db_timestamp(),
            entry.date,
            entry.time,
            entry.nappy,
            entry.email_address
        ])?;
        Ok(changed == 1)
    }

    fn count(&mut self) -> AppResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM nappy_log", [], |row| row.get(0))?)
    }
}
