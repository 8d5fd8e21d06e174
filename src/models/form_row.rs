//! One submission of the intake form, as read from the worksheet.

/// Column headers the form writes into row 1 of its response sheet.
pub const EXPECTED_HEADERS: [&str; 5] = ["Timestamp", "Date", "Time", "Nappy", "Email Address"];

/// A worksheet row. All cells are kept as the raw text the sheet renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRow {
    pub timestamp: String,
    pub date: String,
    pub time: String,
    pub nappy: String,
    pub email_address: String,
}

impl FormRow {
    pub fn new(timestamp: &str, date: &str, time: &str, nappy: &str, email_address: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            nappy: nappy.to_string(),
            email_address: email_address.to_string(),
        }
    }

    /// Build a row from cells laid out in `EXPECTED_HEADERS` order.
    /// Missing trailing cells become empty strings.
    pub fn from_cells(cells: [&str; 5]) -> Self {
        let [timestamp, date, time, nappy, email_address] = cells;
        Self::new(timestamp, date, time, nappy, email_address)
    }

    pub fn has_timestamp(&self) -> bool {
        !self.timestamp.trim().is_empty()
    }
}
