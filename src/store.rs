//! Entity store for bags and cuboids.
//!
//! Handlers receive the store as an `Arc<dyn EntityStore>` through
//! `AppState`; nothing reaches for a global connection. The store enforces
//! field-level constraints (non-negative dimensions, non-empty titles) but
//! knows nothing about capacity, which lives in `crate::capacity`.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use thiserror::Error;

use crate::capacity::{CuboidPatch, LoadedBag};
use crate::db::entities::{bag, cuboid};

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// A field failed a constraint check
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Fields accepted when creating a bag
#[derive(Debug, Clone, Deserialize)]
pub struct NewBag {
    pub title: String,
    pub volume: i64,
    #[serde(default)]
    pub disabled: bool,
}

/// Point lookups and child listings over bags and cuboids.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All cuboids, ordered by id
    async fn list_cuboids(&self) -> StoreResult<Vec<cuboid::Model>>;

    async fn find_cuboid(&self, id: i32) -> StoreResult<Option<cuboid::Model>>;

    /// Insert a cuboid into `bag_id`. Capacity must already be validated.
    async fn insert_cuboid(&self, bag_id: i32, patch: CuboidPatch) -> StoreResult<cuboid::Model>;

    /// Overwrite width, height and depth; the owning bag never changes
    async fn update_cuboid(
        &self,
        cuboid: cuboid::Model,
        patch: CuboidPatch,
    ) -> StoreResult<cuboid::Model>;

    /// Returns `false` if nothing was removed
    async fn delete_cuboid(&self, id: i32) -> StoreResult<bool>;

    /// All bags with their cuboids, ordered by id
    async fn list_bags(&self) -> StoreResult<Vec<LoadedBag>>;

    /// A bag with its current cuboids
    async fn find_bag(&self, id: i32) -> StoreResult<Option<LoadedBag>>;

    async fn insert_bag(&self, bag: NewBag) -> StoreResult<bag::Model>;

    /// Returns `false` if the bag does not exist
    async fn set_bag_disabled(&self, id: i32, disabled: bool) -> StoreResult<bool>;
}

fn check_non_negative(field: &str, value: i64) -> StoreResult<()> {
    if value < 0 {
        return Err(StoreError::Validation(format!("{} must be non-negative", field)));
    }
    Ok(())
}

fn validate_patch(patch: &CuboidPatch) -> StoreResult<()> {
    check_non_negative("width", patch.width)?;
    check_non_negative("height", patch.height)?;
    check_non_negative("depth", patch.depth)
}

fn validate_new_bag(bag: &NewBag) -> StoreResult<()> {
    if bag.title.trim().is_empty() {
        return Err(StoreError::Validation("title must not be empty".to_string()));
    }
    check_non_negative("volume", bag.volume)
}

fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// SQLite-backed store using SeaORM
pub struct SeaOrmStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntityStore for SeaOrmStore {
    async fn list_cuboids(&self) -> StoreResult<Vec<cuboid::Model>> {
        let cuboids = cuboid::Entity::find()
            .order_by_asc(cuboid::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(cuboids)
    }

    async fn find_cuboid(&self, id: i32) -> StoreResult<Option<cuboid::Model>> {
        Ok(cuboid::Entity::find_by_id(id).one(self.db.as_ref()).await?)
    }

    async fn insert_cuboid(&self, bag_id: i32, patch: CuboidPatch) -> StoreResult<cuboid::Model> {
        validate_patch(&patch)?;

        let new_cuboid = cuboid::ActiveModel {
            width: Set(patch.width),
            height: Set(patch.height),
            depth: Set(patch.depth),
            bag_id: Set(bag_id),
            created_at: Set(now_secs()),
            ..Default::default()
        };
        let inserted = new_cuboid.insert(self.db.as_ref()).await?;
        tracing::debug!("Inserted cuboid {} into bag {}", inserted.id, bag_id);
        Ok(inserted)
    }

    async fn update_cuboid(
        &self,
        cuboid: cuboid::Model,
        patch: CuboidPatch,
    ) -> StoreResult<cuboid::Model> {
        validate_patch(&patch)?;

        let mut active: cuboid::ActiveModel = cuboid.into();
        active.width = Set(patch.width);
        active.height = Set(patch.height);
        active.depth = Set(patch.depth);
        Ok(active.update(self.db.as_ref()).await?)
    }

    async fn delete_cuboid(&self, id: i32) -> StoreResult<bool> {
        let result = cuboid::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_bags(&self) -> StoreResult<Vec<LoadedBag>> {
        let bags = bag::Entity::find()
            .order_by_asc(bag::Column::Id)
            .find_with_related(cuboid::Entity)
            .all(self.db.as_ref())
            .await?;
        Ok(bags
            .into_iter()
            .map(|(bag, cuboids)| LoadedBag { bag, cuboids })
            .collect())
    }

    async fn find_bag(&self, id: i32) -> StoreResult<Option<LoadedBag>> {
        let bag = match bag::Entity::find_by_id(id).one(self.db.as_ref()).await? {
            Some(b) => b,
            None => return Ok(None),
        };
        let cuboids = bag
            .find_related(cuboid::Entity)
            .order_by_asc(cuboid::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(Some(LoadedBag { bag, cuboids }))
    }

    async fn insert_bag(&self, bag: NewBag) -> StoreResult<bag::Model> {
        validate_new_bag(&bag)?;

        let new_bag = bag::ActiveModel {
            title: Set(bag.title),
            volume: Set(bag.volume),
            disabled: Set(bag.disabled),
            created_at: Set(now_secs()),
            ..Default::default()
        };
        Ok(new_bag.insert(self.db.as_ref()).await?)
    }

    async fn set_bag_disabled(&self, id: i32, disabled: bool) -> StoreResult<bool> {
        let result = bag::Entity::update_many()
            .col_expr(bag::Column::Disabled, Expr::value(disabled))
            .filter(bag::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }
}
