//! Kanban notes backend: HTTP/JSON CRUD over a single notes collection.
//!
//! Default: http://0.0.0.0:8080/

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod controllers;
mod db;
mod error;

use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Kanban backend v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Opening database at {}", config.database_url);
    let db = match Database::new(&config.database_url, config.database_pool_size) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState {
        db: Arc::clone(&db),
        config,
        started_at: Instant::now(),
    });

    let bind = (state.config.host.clone(), state.config.port);
    log::info!("Listening on http://{}:{}", bind.0, bind.1);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
    })
    .bind(bind)?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        log::info!("Stopping HTTP server...");
        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }
    });

    server.await?;

    log::info!("Closing database pool");
    drop(db);

    log::info!("Shutdown complete");
    Ok(())
}
