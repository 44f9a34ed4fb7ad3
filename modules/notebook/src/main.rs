//! Notebook Service — JSON RPC server for topic-indexed notes.
//!
//! Default: http://127.0.0.1:8000/

use clap::Parser;
use notebook_service::config::ServiceConfig;
use notebook_service::routes::{self, AppState};
use notebook_service::wikipedia_client::WikipediaClient;
use notebook_service::{NoteStore, NotebookService};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServiceConfig::parse();

    let store = match NoteStore::open(&config.db_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open note database: {}", e);
            std::process::exit(1);
        }
    };

    let wikipedia = WikipediaClient::new(&config.wikipedia_url, config.lookup_timeout());

    let state = Arc::new(AppState {
        service: NotebookService::new(Arc::new(store), Arc::new(wikipedia)),
    });

    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Notebook Service listening on http://{} (database: {})",
        addr,
        config.db_path.display()
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }

    log::info!("Notebook Service shut down");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
