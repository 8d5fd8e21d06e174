pub mod form_row;
pub mod log_entry;

pub use form_row::FormRow;
pub use log_entry::LogEntry;
