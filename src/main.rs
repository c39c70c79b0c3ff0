//! Binary entry point: load settings, set up file logging, build the store
//! client, and drive the Ratatui event loop until the user exits.
use book_inventory::config::log_path;
use book_inventory::logging::init_logging;
use book_inventory::{run_app, App, AppConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;
    init_logging(&log_path()?, &config.log_level)?;

    let store = config.store.build()?;
    info!(store = %store.describe(), "starting book inventory viewer");

    let mut app = App::new(store);
    run_app(&mut app)
}
