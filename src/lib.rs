//! nappy-sync library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind them: the sheet reader, the sync decision and the SQL sink.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod sheets;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands, SyncArgs};
use config::{Config, Overrides};
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(command: &Commands, cfg: &Config) -> AppResult<()> {
    match command {
        Commands::Sync(args) => cli::commands::sync::handle(args, cfg),
        Commands::Init => cli::commands::init::handle(cfg),
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::Config { .. } => cli::commands::config::handle(command, cfg),
    }
}

fn overrides_for(cli: &Cli, command: &Commands) -> Overrides {
    let mut overrides = Overrides {
        database_url: cli.db.clone(),
        ..Overrides::default()
    };
    if let Commands::Sync(args) = command {
        overrides.sheet_name = args.sheet.clone();
        overrides.sheet_id = args.sheet_id.clone();
        overrides.worksheet = args.worksheet.clone();
    }
    overrides
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI; a bare invocation is a sync
    let cli = Cli::parse();
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| Commands::Sync(SyncArgs::default()));

    // 2️⃣ resolve configuration ONCE
    let cfg = Config::load(cli.config.as_deref(), &overrides_for(&cli, &command))?;
    log::debug!("configuration: {:?}", cfg.redacted_lines());

    // 3️⃣ hand everything to the dispatcher
    dispatch(&command, &cfg)
}
