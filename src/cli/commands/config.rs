use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // Without flags, print.
        if *print_config || !*check {
            header("Resolved configuration");
            for (key, value) in cfg.redacted_lines() {
                println!("{key:>16}: {value}");
            }
        }

        if *check {
            cfg.check_for_sheets()?;
            success("Configuration is complete.");
        }
    }

    Ok(())
}
