// pawdex entry point.
// Loads configuration, sets up file logging, wires the repository, and runs the TUI.

mod app;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::sync::Arc;

use pawdex::{BreedApi, BreedClient, Config, Kind, LocalStore, PreferenceStore, Repository};

use crate::app::App;

#[tokio::main]
async fn main() -> pawdex::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pawdex: {}", e);
            std::process::exit(2);
        }
    };

    // The terminal belongs to the UI, so logs go to a file.
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    log::info!("Starting pawdex, data in {}", config.data_dir.display());

    let store = Arc::new(LocalStore::open(&config.database_path())?);
    let api = BreedApi::new(
        BreedClient::new(Kind::Cat, &config.cat_api_url, &config.cat_api_key)?,
        BreedClient::new(Kind::Dog, &config.dog_api_url, &config.dog_api_key)?,
    )?;
    let repo = Arc::new(Repository::new(api, store, config.repository_options()));
    let prefs = PreferenceStore::load(&config.prefs_path())?;

    let mut app = App::new(repo, prefs);
    app.start();

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    log::info!("Exiting");
    Ok(())
}
