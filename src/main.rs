// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use product_api::config::AppConfig;
use product_api::database;
use product_api::routes;
use product_api::state::AppState;
use product_api::store::{MemoryProductStore, PgProductStore, ProductStore};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // Pick the product store
    let store: Arc<dyn ProductStore> = match &config.database {
        Some(db) => match database::create_pool(&db.url, db.max_connections).await {
            Ok(pool) => Arc::new(PgProductStore::new(pool)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create database pool");
                return;
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set, products are kept in memory");
            Arc::new(MemoryProductStore::new())
        }
    };

    let app = routes::build_app(AppState::new(store), &config.cors);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let host = config.server.host;
    let base_port = config.server.port;
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
