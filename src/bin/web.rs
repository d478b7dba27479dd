//! Single binary web server: JSON API under /api, static files from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `padel_tournament_web::config` for the
//! environment variables it reads.

use actix_files::Files;
use actix_web::{web::Data, App, HttpServer};
use padel_tournament_web::api;
use padel_tournament_web::config::ServerConfig;
use padel_tournament_web::MemoryStore;
use std::io;
use std::path::Path;

fn flush_snapshot(store: &MemoryStore, path: &Path) {
    match store.flush(path) {
        Ok(true) => log::debug!("Snapshot written to {}", path.display()),
        Ok(false) => {}
        Err(e) => log::error!("Snapshot flush failed: {}", e),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = match &config.data_file {
        Some(path) => MemoryStore::load(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?,
        None => {
            log::warn!("DATA_FILE not set; tournament state lives in memory only");
            MemoryStore::new()
        }
    };
    let state = Data::new(store);

    // Background task: write the snapshot whenever the store changed since the last tick
    if let Some(path) = config.data_file.clone() {
        let state_flush = state.clone();
        let every = config.snapshot_interval;
        actix_web::rt::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let store = state_flush.clone();
                let path = path.clone();
                if let Err(e) =
                    tokio::task::spawn_blocking(move || flush_snapshot(&store, &path)).await
                {
                    log::error!("Snapshot task panicked: {}", e);
                }
            }
        });
    }

    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::info!("Static dir {} not found; serving API only", static_dir.display());
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    let app_state = state.clone();
    HttpServer::new(move || {
        let app = App::new()
            .app_data(app_state.clone())
            .configure(api::configure);
        if serve_static {
            app.service(Files::new("/static", static_dir.clone()).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    if let Some(path) = &config.data_file {
        flush_snapshot(&state, path);
    }
    Ok(())
}
