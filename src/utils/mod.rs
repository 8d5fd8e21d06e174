pub mod formatting;
pub mod time;

pub use formatting::redact_url;
pub use time::parse_form_timestamp;
