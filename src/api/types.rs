//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};

use crate::capacity::{CuboidPatch, LoadedBag, Payload};
use crate::db::entities::cuboid;

// ============================================================================
// Request Types
// ============================================================================

/// POST /cuboids and PUT /cuboids/:id request body.
///
/// Missing dimensions default to zero. `bagId` is ignored on update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuboidInput {
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub depth: i64,
    #[serde(default)]
    pub bag_id: i32,
}

impl CuboidInput {
    pub fn patch(&self) -> CuboidPatch {
        CuboidPatch::new(self.width, self.height, self.depth)
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CuboidResponse {
    pub id: i32,
    pub width: i64,
    pub height: i64,
    pub depth: i64,
    pub volume: i64,
    pub bag_id: i32,
}

impl From<&cuboid::Model> for CuboidResponse {
    fn from(c: &cuboid::Model) -> Self {
        Self {
            id: c.id,
            width: c.width,
            height: c.height,
            depth: c.depth,
            volume: c.payload_volume(),
            bag_id: c.bag_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagResponse {
    pub id: i32,
    pub title: String,
    pub volume: i64,
    pub disabled: bool,
    pub payload_volume: i64,
    pub available_volume: i64,
    pub cuboids: Vec<CuboidResponse>,
}

impl From<&LoadedBag> for BagResponse {
    fn from(b: &LoadedBag) -> Self {
        Self {
            id: b.bag.id,
            title: b.bag.title.clone(),
            volume: b.bag.volume,
            disabled: b.bag.disabled,
            payload_volume: b.payload_volume(),
            available_volume: b.available_volume(),
            cuboids: b.cuboids.iter().map(CuboidResponse::from).collect(),
        }
    }
}

/// DELETE /cuboids/:id confirmation
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
