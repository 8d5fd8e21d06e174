use crate::cli::parser::SyncArgs;
use crate::config::Config;
use crate::core::sync::{SyncLogic, SyncOptions, SyncOutcome};
use crate::db::open_store;
use crate::errors::AppResult;
use crate::sheets::{CsvSource, RowSource, SheetsSource};
use crate::ui::messages::{info, success};

/// Handle the `sync` command (also the default when no command is given).
pub fn handle(args: &SyncArgs, cfg: &Config) -> AppResult<()> {
    // Fail before any network call when settings are missing.
    let database = cfg.require_database()?;
    if args.csv.is_none() {
        cfg.check_for_sheets()?;
    }

    let mut source: Box<dyn RowSource + '_> = match &args.csv {
        Some(path) => Box::new(CsvSource::new(path)),
        None => Box::new(SheetsSource::new(cfg)),
    };

    let outcome = SyncLogic::run(
        source.as_mut(),
        || open_store(database, false),
        SyncOptions {
            dry_run: args.dry_run,
        },
    )?;

    match outcome {
        SyncOutcome::EmptySource => info("No data found in sheet."),
        SyncOutcome::NoNewRows => info("No new rows found since last run."),
        SyncOutcome::Inserted(entry) => success(format!(
            "Inserted new row with timestamp: {}",
            entry.raw_timestamp
        )),
        SyncOutcome::AlreadyPresent(entry) => info(format!(
            "Row with timestamp {} already present; nothing inserted.",
            entry.raw_timestamp
        )),
        SyncOutcome::DryRun(entry) => info(format!(
            "Dry run: would insert row with timestamp {} ({}, {})",
            entry.raw_timestamp,
            entry.nappy,
            entry.email_address
        )),
    }

    Ok(())
}
