//! Source reader for the form's response worksheet.

pub mod auth;
pub mod client;
pub mod reader;

pub use reader::{CsvSource, RowSource, SheetsSource, records_from_values};
