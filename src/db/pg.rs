//! PostgreSQL sink over the synchronous `postgres` client.

use super::LogStore;
use crate::errors::{AppError, AppResult};
use crate::models::LogEntry;
use crate::utils::time::{DB_TIMESTAMP_FORMAT, FORM_TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use postgres::types::{ToSql, Type};
use postgres::{Client, NoTls, Row};

const INSERT_ENTRY: &str = "INSERT INTO nappy_log (timestamp, date, time, nappy, email_address)
     VALUES ($1, $2, $3, $4, $5)
     ON CONFLICT (timestamp) DO NOTHING";

pub struct PgStore {
    client: Client,
}

impl PgStore {
    pub fn connect(url: &str) -> AppResult<Self> {
        let client = Client::connect(url, NoTls)?;
        Ok(Self { client })
    }
}

/// Read the watermark column. Tables created by `init` use `TIMESTAMP`;
/// older hand-made tables may keep text instead.
fn watermark_from_row(row: &Row) -> AppResult<Option<NaiveDateTime>> {
    if let Ok(ts) = row.try_get::<_, Option<NaiveDateTime>>(0) {
        return Ok(ts);
    }
    let raw: Option<String> = row.try_get(0)?;
    raw.as_deref().map(parse_text_watermark).transpose()
}

/// A watermark stored as text, in the storage layout or the form's layout.
fn parse_text_watermark(raw: &str) -> AppResult<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, DB_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, FORM_TIMESTAMP_FORMAT))
        .map_err(|_| AppError::InvalidTimestamp(raw.to_string()))
}

/// Text columns get the `YYYY-MM-DD HH:MM:SS` string instead of a timestamp.
fn binds_timestamp_as_text(param: &Type) -> bool {
    <String as ToSql>::accepts(param)
}

impl LogStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn ensure_schema(&mut self) -> AppResult<()> {
        self.client.batch_execute(
            r#"
            CREATE TABLE IF NOT EXISTS nappy_log (
                id             SERIAL PRIMARY KEY,
                timestamp      TIMESTAMP NOT NULL UNIQUE,
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
        let row = self
            .client
            .query_one("SELECT MAX(timestamp) FROM nappy_log", &[])?;
        watermark_from_row(&row)
    }

    fn insert_if_absent(&mut self, entry: &LogEntry) -> AppResult<bool> {
        // The server infers $1 from the column type.
        let stmt = self.client.prepare(INSERT_ENTRY)?;
        let as_text = stmt.params().first().is_some_and(binds_timestamp_as_text);
        let text = entry.db_timestamp();
        let timestamp: &(dyn ToSql + Sync) = if as_text { &text } else { &entry.timestamp };

        let changed = self.client.execute(
            &stmt,
            &[
                timestamp,
                &entry.date,
                &entry.time,
                &entry.nappy,
                &entry.email_address,
            ],
        )?;
        Ok(changed == 1)
    }

    fn count(&mut self) -> AppResult<i64> {
        let row = self.client.query_one("SELECT COUNT(*) FROM nappy_log", &[])?;
        Ok(row.try_get(0)?)
    }
}
