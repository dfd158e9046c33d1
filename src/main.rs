mod config;
mod db;
mod import;
mod logging;
mod models;
mod payoff;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: {e}");
    }
    let mut db = db::Database::open(&config.db_path)?;

    match args.len() {
        0 | 1 => run::as_tui(&mut db, &config),
        _ => run::as_cli(&args, &mut db, &config),
    }
}
