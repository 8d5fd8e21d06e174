//! Incremental sync decision.
//!
//! Rows are classified one by one against the watermark (the latest stored
//! timestamp). Only the last new row in sheet order is persisted; any other
//! new rows are dropped for this run and will not be picked up later once the
//! watermark has moved past them.

use crate::db::LogStore;
use crate::errors::AppResult;
use crate::models::{FormRow, LogEntry};
use crate::sheets::RowSource;
use crate::ui::messages::warning;
use crate::utils::time::parse_form_timestamp;
use chrono::NaiveDateTime;

/// Why a row never reached the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Incomplete submission, silently ignored.
    EmptyTimestamp,
    /// Raw value that did not match `DD/MM/YYYY HH:MM:SS`.
    InvalidTimestamp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Skipped(SkipReason),
    /// At or before the watermark.
    AlreadySynced(NaiveDateTime),
    New(NaiveDateTime),
}

/// Classify one row. Equality with the watermark counts as already synced.
pub fn classify(row: &FormRow, watermark: Option<NaiveDateTime>) -> RowOutcome {
    if !row.has_timestamp() {
        return RowOutcome::Skipped(SkipReason::EmptyTimestamp);
    }
    let ts = match parse_form_timestamp(&row.timestamp) {
        Ok(ts) => ts,
        Err(_) => {
            return RowOutcome::Skipped(SkipReason::InvalidTimestamp(row.timestamp.clone()));
        }
    };
    match watermark {
        Some(w) if ts <= w => RowOutcome::AlreadySynced(ts),
        _ => RowOutcome::New(ts),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// One outcome per fetched row, in fetch order.
    pub outcomes: Vec<RowOutcome>,
    pub new_rows: usize,
    /// Last new row in fetch order, if any.
    pub selected: Option<LogEntry>,
}

impl SyncPlan {
    /// Raw values of rows skipped for an unparseable timestamp.
    pub fn invalid_timestamps(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                RowOutcome::Skipped(SkipReason::InvalidTimestamp(raw)) => Some(raw.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub fn plan(rows: &[FormRow], watermark: Option<NaiveDateTime>) -> SyncPlan {
    let mut outcomes = Vec::with_capacity(rows.len());
    let mut new_rows = 0;
    let mut selected = None;

    for row in rows {
        let outcome = classify(row, watermark);
        if let RowOutcome::New(ts) = outcome {
            new_rows += 1;
            selected = Some(LogEntry::from_row(row, ts));
        }
        outcomes.push(outcome);
    }

    SyncPlan {
        outcomes,
        new_rows,
        selected,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The source had no rows; the sink was not opened.
    EmptySource,
    NoNewRows,
    Inserted(LogEntry),
    /// The insert hit the unique timestamp (a concurrent run got there first).
    AlreadyPresent(LogEntry),
    /// `--dry-run`: the row that would have been inserted.
    DryRun(LogEntry),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub dry_run: bool,
}

pub struct SyncLogic;

impl SyncLogic {
    /// Fetch, compare, insert at most one row.
    ///
    /// `open_store` is only called once the source returned at least one row,
    /// so an empty sheet never touches the database.
    pub fn run<F>(
        source: &mut dyn RowSource,
        open_store: F,
        options: SyncOptions,
    ) -> AppResult<SyncOutcome>
    where
        F: FnOnce() -> AppResult<Box<dyn LogStore>>,
    {
        let rows = source.fetch_rows()?;
        log::info!("fetched {} rows from {}", rows.len(), source.describe());
        if rows.is_empty() {
            return Ok(SyncOutcome::EmptySource);
        }

        let mut store = open_store()?;
        let watermark = store.watermark()?;
        log::info!("watermark on {}: {:?}", store.backend(), watermark);

        let plan = plan(&rows, watermark);
        log::debug!("{} new rows of {}", plan.new_rows, rows.len());

        // Printed before the insert; a failing sink must not hide them.
        for raw in plan.invalid_timestamps() {
            warning(format!("Skipping row with invalid timestamp: {raw}"));
        }
        if plan.new_rows > 1 {
            warning(format!(
                "{} new rows found; only the most recent one is inserted",
                plan.new_rows
            ));
        }

        let outcome = match &plan.selected {
            None => SyncOutcome::NoNewRows,
            Some(entry) if options.dry_run => SyncOutcome::DryRun(entry.clone()),
            Some(entry) => {
                if store.insert_if_absent(entry)? {
                    SyncOutcome::Inserted(entry.clone())
                } else {
                    SyncOutcome::AlreadyPresent(entry.clone())
                }
            }
        };

        Ok(outcome)
    }
}
