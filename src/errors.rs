//! Unified application error type.
//! Every module (config, sheets, db, core, cli) returns AppError so the
//! binary has a single place where failures are reported.

use std::io;
use thiserror::Error;

/// Coarse classification of failures. Every kind except `Parse` ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed settings/credentials. Fatal, detected before any I/O.
    Configuration,
    /// The worksheet header row is not the one the form produces. Fatal.
    SchemaMismatch,
    /// A single row could not be interpreted. The row is skipped.
    Parse,
    /// The spreadsheet API or the database could not be reached or refused a request. Fatal.
    Connectivity,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Configuration
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration value: {0}")]
    MissingSetting(&'static str),

    #[error("Malformed credentials: {0}")]
    Credentials(#[from] serde_json::Error),

    #[error("Malformed settings file: {0}")]
    SettingsFile(#[from] serde_yaml::Error),

    #[error("Unable to sign token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    // ---------------------------
    // Source schema
    // ---------------------------
    #[error("Unexpected worksheet headers: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },

    // ---------------------------
    // Per-row parsing
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Connectivity
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spreadsheet API error: {0}")]
    Sheets(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_)
            | AppError::MissingSetting(_)
            | AppError::Credentials(_)
            | AppError::SettingsFile(_)
            | AppError::Signing(_) => ErrorKind::Configuration,
            AppError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            AppError::InvalidTimestamp(_) => ErrorKind::Parse,
            AppError::Io(_)
            | AppError::Db(_)
            | AppError::Postgres(_)
            | AppError::Http(_)
            | AppError::Sheets(_)
            | AppError::Csv(_) => ErrorKind::Connectivity,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_their_kind() {
        assert_eq!(AppError::InvalidTimestamp("x".into()).kind(), ErrorKind::Parse);
        assert_eq!(AppError::MissingSetting("database").kind(), ErrorKind::Configuration);
        assert_eq!(AppError::Sheets("403".into()).kind(), ErrorKind::Connectivity);
        assert_eq!(
            AppError::SchemaMismatch {
                expected: "a".into(),
                found: "b".into()
            }
            .kind(),
            ErrorKind::SchemaMismatch
        );
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
