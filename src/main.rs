mod api;
mod capacity;
mod config;
mod db;
mod error;
mod store;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::AppState;
use config::ServerConfig;
use store::SeaOrmStore;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cuboid_bags=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // Initialize database
    let db = db::init_database(&config.database_url)
        .await
        .expect("Failed to initialize database");
    let store = Arc::new(SeaOrmStore::new(Arc::new(db)));

    let state = Arc::new(AppState::new(store));
    let app = api::router(state);

    let addr = config.bind_addr();
    tracing::info!("Cuboid server starting on http://{}", addr);
    tracing::info!("");
    tracing::info!("API Endpoints:");
    tracing::info!("  GET/POST        /cuboids     - List or create cuboids");
    tracing::info!("  GET/PUT/DELETE  /cuboids/:id - Read, resize or remove a cuboid");
    tracing::info!("  GET/POST        /bags        - List or create bags");
    tracing::info!("  GET             /bags/:id    - Bag contents and free volume");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
