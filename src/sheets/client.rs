//! Thin blocking client for the two Google endpoints the reader needs:
//! Drive file search (title → id) and Sheets `values.get`.

use super::auth::{ServiceAccountKey, fetch_access_token};
use crate::config::SheetRef;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

pub struct SheetsClient {
    http: Client,
    token: String,
}

impl SheetsClient {
    /// Authenticate with the service account and keep the bearer token.
    pub fn connect(key: &ServiceAccountKey) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("nappy-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let token = fetch_access_token(&http, key)?;
        Ok(Self { http, token })
    }

    /// Resolve a spreadsheet reference to its document id.
    pub fn spreadsheet_id(&self, sheet: &SheetRef) -> AppResult<String> {
        match sheet {
            SheetRef::Id(id) => Ok(id.clone()),
            SheetRef::Name(name) => self.find_by_title(name),
        }
    }

    fn find_by_title(&self, title: &str) -> AppResult<String> {
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            escape_query_literal(title)
        );
        log::debug!("searching Drive for spreadsheet \"{title}\"");

        let response = self
            .http
            .get(DRIVE_FILES_API)
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()?;
        let list: DriveFileList = checked(response, "Drive file search")?.json()?;

        let mut files = list.files.into_iter();
        match files.next() {
            Some(file) => {
                if files.next().is_some() {
                    log::warn!("several spreadsheets are named \"{title}\"; using {}", file.id);
                }
                log::debug!("resolved \"{}\" to {}", file.name, file.id);
                Ok(file.id)
            }
            None => Err(AppError::Config(format!(
                "no spreadsheet named \"{title}\" is shared with the service account"
            ))),
        }
    }

    /// All populated cells of a worksheet, row-major, rendered as text.
    pub fn worksheet_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
    ) -> AppResult<Vec<Vec<String>>> {
        let url = format!(
            "{SHEETS_API}/{}/values/{}",
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(&a1_sheet_range(worksheet))
        );
        log::debug!("fetching values from {url}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ])
            .send()?;
        let range: ValueRange = checked(response, "worksheet fetch")?.json()?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}

fn checked(response: Response, what: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(AppError::Sheets(format!("{what} failed with {status}: {}", body.trim())))
}

/// A1 range covering a whole worksheet: the quoted sheet name.
pub fn a1_sheet_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
