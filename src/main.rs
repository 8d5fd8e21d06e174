//! nappy-sync main entrypoint.

use nappysync::errors::ErrorKind;
use nappysync::run;
use nappysync::ui::messages::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error(format!("Error: {e}"));
        if e.kind() == ErrorKind::Configuration {
            error("Run `nappy-sync config --print` to see the resolved settings.");
        }
        std::process::exit(1);
    }
}
