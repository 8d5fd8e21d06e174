use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for nappy-sync
/// Copies the newest form submission from a Google Sheet into `nappy_log`
#[derive(Parser)]
#[command(
    name = "nappy-sync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sync the latest nappy-change form submission from Google Sheets into a SQL table",
    long_about = None
)]
pub struct Cli {
    /// Override the database connection string (postgres:// URL or SQLite path)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Read settings from this YAML file instead of the default location
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Defaults to `sync` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Insert the newest form submission not yet stored
    Sync(SyncArgs),

    /// Create the nappy_log table if it does not exist
    Init,

    /// Show the latest stored timestamp and the number of entries
    Status,

    /// Inspect the resolved configuration
    Config {
        #[arg(long = "print", help = "Print the resolved configuration (secrets redacted)")]
        print_config: bool,

        #[arg(long = "check", help = "Check that everything `sync` needs is configured")]
        check: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct SyncArgs {
    /// Read rows from a CSV export of the worksheet instead of the API
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Decide what would be inserted without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Spreadsheet title (overrides SHEET_NAME)
    #[arg(long = "sheet", conflicts_with = "sheet_id")]
    pub sheet: Option<String>,

    /// Spreadsheet id (overrides SHEET_ID)
    #[arg(long = "sheet-id")]
    pub sheet_id: Option<String>,

    /// Worksheet tab name (default: "Form Responses 1")
    #[arg(long = "worksheet")]
    pub worksheet: Option<String>,
}
