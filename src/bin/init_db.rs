//! One-shot creation of the `tasks` table in the configured database file.

use log::{error, info};
use std::process::ExitCode;

use kanban_board::config::{AppConfig, TaskBackend};
use kanban_board::logging;
use kanban_board::task::schema::init_database;

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("init_db: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("init_db: {}", e);
        return ExitCode::FAILURE;
    }

    if config.database.backend != TaskBackend::SQLite {
        info!("Backend {:?} keeps no schema; nothing to do", config.database.backend);
        return ExitCode::SUCCESS;
    }

    match init_database(&config.database.db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to initialize {}: {}", config.database.db_path, e);
            ExitCode::FAILURE
        }
    }
}
