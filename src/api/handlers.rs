use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::types::{BagResponse, CuboidInput, CuboidResponse, StatusResponse};
use crate::capacity::{validate_create, validate_update};
use crate::error::{Result, ServerError};
use crate::store::{EntityStore, NewBag};

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(v)| v).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ServerError::Validation(rejection.body_text())
    })
}

/// GET /cuboids - List cuboids
pub async fn list_cuboids(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let cuboids = state.store.list_cuboids().await?;
    let body: Vec<CuboidResponse> = cuboids.iter().map(CuboidResponse::from).collect();
    Ok(Json(body))
}

/// GET /cuboids/:id - Get one cuboid
pub async fn get_cuboid(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id.map_err(|_| ServerError::CuboidNotFound)?;

    let cuboid = state
        .store
        .find_cuboid(id)
        .await?
        .ok_or(ServerError::CuboidNotFound)?;
    Ok(Json(CuboidResponse::from(&cuboid)))
}

/// POST /cuboids - Add a cuboid to a bag
pub async fn create_cuboid(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<CuboidInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = json_body(body)?;
    let patch = input.patch();

    let bag = state.store.find_bag(input.bag_id).await?;
    if let Err(e) = validate_create(bag.as_ref(), &patch) {
        tracing::debug!("Rejected cuboid for bag {}: {}", input.bag_id, e);
        return Err(e);
    }

    let cuboid = state.store.insert_cuboid(input.bag_id, patch).await?;
    tracing::info!("Created cuboid {} in bag {}", cuboid.id, cuboid.bag_id);

    Ok((StatusCode::CREATED, Json(CuboidResponse::from(&cuboid))))
}

/// PUT /cuboids/:id - Resize a cuboid
pub async fn update_cuboid(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i32>, PathRejection>,
    body: std::result::Result<Json<CuboidInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id.map_err(|_| ServerError::CuboidNotFound)?;

    let existing = state
        .store
        .find_cuboid(id)
        .await?
        .ok_or(ServerError::CuboidNotFound)?;

    let patch = json_body(body)?.patch();

    let bag = state.store.find_bag(existing.bag_id).await?;
    if let Err(e) = validate_update(bag.as_ref(), &existing, &patch) {
        tracing::debug!("Rejected update of cuboid {}: {}", id, e);
        return Err(e);
    }

    let cuboid = state.store.update_cuboid(existing, patch).await?;
    tracing::info!("Updated cuboid {}", cuboid.id);

    Ok(Json(CuboidResponse::from(&cuboid)))
}

/// DELETE /cuboids/:id - Remove a cuboid
pub async fn delete_cuboid(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id.map_err(|_| ServerError::CuboidNotFound)?;

    let cuboid = state
        .store
        .find_cuboid(id)
        .await?
        .ok_or(ServerError::CuboidNotFound)?;

    // Lost a race with another delete
    if !state.store.delete_cuboid(cuboid.id).await? {
        return Err(ServerError::CuboidNotFound);
    }
    tracing::info!("Removed cuboid {} from bag {}", cuboid.id, cuboid.bag_id);

    Ok(Json(StatusResponse {
        status: "Cuboid is Removed",
    }))
}

/// GET /bags - List bags with their contents
pub async fn list_bags(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let bags = state.store.list_bags().await?;
    let body: Vec<BagResponse> = bags.iter().map(BagResponse::from).collect();
    Ok(Json(body))
}

/// GET /bags/:id - Get one bag with its contents
pub async fn get_bag(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id.map_err(|_| ServerError::BagNotFound)?;

    let bag = state
        .store
        .find_bag(id)
        .await?
        .ok_or(ServerError::BagNotFound)?;
    Ok(Json(BagResponse::from(&bag)))
}

/// POST /bags - Create an empty bag
pub async fn create_bag(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<NewBag>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let new_bag = json_body(body)?;

    let bag = state.store.insert_bag(new_bag).await?;
    tracing::info!("Created bag {} '{}' with volume {}", bag.id, bag.title, bag.volume);

    let loaded = crate::capacity::LoadedBag {
        bag,
        cuboids: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(BagResponse::from(&loaded))))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
