mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use handlers::rest;
use repository::Repository;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    // Repository creation
    let repo = Repository::connect(&cfg.database_url)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // Router config
    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.listen_addr);
            panic!("failed to bind to {}: {e}", cfg.listen_addr);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes API starting, listening on {}", addr),
        Err(_) => tracing::info!("Notes API starting, listening on {}", cfg.listen_addr),
    }

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
