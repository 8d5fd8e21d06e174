use crate::config::Config;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::bold;
use crate::utils::redact_url;
use crate::utils::time::format_form_timestamp;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let database = cfg.require_database()?;
    let mut store = open_store(database, false)?;

    let watermark = store.watermark()?;
    let count = store.count()?;

    header(format!("nappy_log on {}", redact_url(database)));
    println!("• Backend:   {}", store.backend());
    println!("• Entries:   {}", bold(&count.to_string()));
    match watermark {
        Some(ts) => println!("• Watermark: {}", bold(&format_form_timestamp(&ts))),
        None => println!("• Watermark: empty"),
    }
    Ok(())
}
