use actix_web::{web, App, HttpServer};
use log::{error, info};
use std::env;
use std::sync::Arc;

use uptime_collector::{Config, UptimeStore};

mod controllers;
mod services;
mod state;

use crate::state::AppState;

const DEFAULT_PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = env::var("DASHBOARD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let embedded_monitor = env::var("EMBEDDED_MONITOR")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true);

    let config = Config::from_env();
    let store = match UptimeStore::open(&config.db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open {}: {}", config.db_path.display(), e);
            return Err(std::io::Error::other(e));
        }
    };

    if embedded_monitor {
        if let Some(collector) = services::monitoring::embedded_collector(config, Arc::clone(&store)) {
            actix_web::rt::spawn(services::monitoring::uptime_monitor(collector));
        }
    } else {
        info!("Embedded uptime monitor disabled");
    }

    let state = web::Data::new(AppState::new(store));

    info!("Listening on port {}...", port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(controllers::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
