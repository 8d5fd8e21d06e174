//! Source reader: turns a worksheet (from the API or a CSV export) into
//! ordered [`FormRow`]s after checking the header row.

use super::client::SheetsClient;
use crate::config::{Config, SheetRef};
use crate::errors::{AppError, AppResult};
use crate::models::FormRow;
use crate::models::form_row::EXPECTED_HEADERS;
use std::path::PathBuf;

/// Anything that can hand over the form rows, oldest submission first.
pub trait RowSource {
    /// Short label used in console output.
    fn describe(&self) -> String;

    fn fetch_rows(&mut self) -> AppResult<Vec<FormRow>>;
}

/// Map raw worksheet values to records keyed by the expected headers.
///
/// The first row is the header row. Each expected header must appear exactly
/// once; other columns are ignored and column order does not matter. An empty
/// worksheet, or one holding only the header row, yields no records.
pub fn records_from_values(values: Vec<Vec<String>>) -> AppResult<Vec<FormRow>> {
    let mut rows = values.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let mut positions = [0usize; 5];
    for (slot, expected) in positions.iter_mut().zip(EXPECTED_HEADERS) {
        let mut found = header
            .iter()
            .enumerate()
            .filter(|(_, h)| h.as_str() == expected)
            .map(|(i, _)| i);
        match (found.next(), found.next()) {
            (Some(i), None) => *slot = i,
            _ => {
                return Err(AppError::SchemaMismatch {
                    expected: EXPECTED_HEADERS.join(", "),
                    found: header.join(", "),
                });
            }
        }
    }

    Ok(rows
        .map(|cells| {
            let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
            FormRow::from_cells(positions.map(cell))
        })
        .collect())
}

/// Rows fetched live from Google Sheets.
pub struct SheetsSource<'a> {
    config: &'a Config,
}

impl<'a> SheetsSource<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

impl RowSource for SheetsSource<'_> {
    fn describe(&self) -> String {
        let doc = match &self.config.sheet {
            Some(SheetRef::Name(name)) => format!("\"{name}\""),
            Some(SheetRef::Id(id)) => id.clone(),
            None => "<unset>".to_string(),
        };
        format!("{doc} / {}", self.config.worksheet)
    }

    fn fetch_rows(&mut self) -> AppResult<Vec<FormRow>> {
        let key = self.config.require_credentials()?;
        let sheet = self.config.require_sheet()?;

        let client = SheetsClient::connect(&key)?;
        let id = client.spreadsheet_id(sheet)?;
        let values = client.worksheet_values(&id, &self.config.worksheet)?;
        log::debug!("worksheet returned {} raw rows", values.len());

        records_from_values(values)
    }
}

/// Rows read from a CSV export of the worksheet.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_rows(&mut self) -> AppResult<Vec<FormRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut values: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            values.push(record.iter().map(str::to_string).collect());
        }

        records_from_values(values)
    }
}
