use crate::config::Config;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::redact_url;

/// Handle the `init` command: create `nappy_log` when missing.
/// This is the only place the tool issues DDL.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let database = cfg.require_database()?;

    let mut store = open_store(database, true)?;
    store.ensure_schema()?;

    success(format!(
        "Table nappy_log ready on {} ({})",
        redact_url(database),
        store.backend()
    ));
    Ok(())
}
