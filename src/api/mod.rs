pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    AppState, create_bag, create_cuboid, delete_cuboid, get_bag, get_cuboid, health, list_bags,
    list_cuboids, update_cuboid,
};

/// Build the full application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Cuboids
        .route("/cuboids", get(list_cuboids).post(create_cuboid))
        .route(
            "/cuboids/:id",
            get(get_cuboid).put(update_cuboid).delete(delete_cuboid),
        )
        // Bags
        .route("/bags", get(list_bags).post(create_bag))
        .route("/bags/:id", get(get_bag))
        // Health check
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
