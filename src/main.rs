use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::io;

use kanban_board::api;
use kanban_board::app_state::AppState;
use kanban_board::config::AppConfig;
use kanban_board::logging;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(io::Error::other)?;
    let log_backend = logging::init(&config.logging).map_err(io::Error::other)?;
    info!("Logging via {:?}; configuration from {}", log_backend, AppConfig::config_path().display());

    let app_state = AppState::from_config(config.clone()).map_err(io::Error::other)?;
    if config.database.init_schema {
        app_state.task_service.ensure_schema().await.map_err(io::Error::other)?;
        info!("Tasks table ready");
    }

    let (host, port) = config.server.bind_address();
    info!("Starting server on {}:{} with {} workers", host, port, config.server.workers);

    let app_state = web::Data::new(app_state);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(api::configure)
    })
    .workers(config.server.workers)
    .bind((host, port))?
    .run()
    .await
}
