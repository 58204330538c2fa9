//! Volume arithmetic and capacity validation.
//!
//! Everything here is pure: callers load the bag and its cuboids from the
//! store and hand them in. A bag's remaining space is always derived from
//! its current children, never stored.

use serde::Deserialize;

use crate::db::entities::{bag, cuboid};
use crate::error::{Result, ServerError};

/// Anything with width, height and depth.
pub trait Payload {
    fn dimensions(&self) -> (i64, i64, i64);

    /// Width × height × depth. Saturates on extreme inputs so an oversized
    /// cuboid is rejected by the capacity check instead of wrapping.
    fn payload_volume(&self) -> i64 {
        let (w, h, d) = self.dimensions();
        w.saturating_mul(h).saturating_mul(d)
    }
}

impl Payload for cuboid::Model {
    fn dimensions(&self) -> (i64, i64, i64) {
        (self.width, self.height, self.depth)
    }
}

/// The mutable part of a cuboid. Updates always overwrite all three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CuboidPatch {
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub depth: i64,
}

impl CuboidPatch {
    pub fn new(width: i64, height: i64, depth: i64) -> Self {
        Self { width, height, depth }
    }
}

impl Payload for CuboidPatch {
    fn dimensions(&self) -> (i64, i64, i64) {
        (self.width, self.height, self.depth)
    }
}

/// A bag together with the cuboids it currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBag {
    pub bag: bag::Model,
    pub cuboids: Vec<cuboid::Model>,
}

impl LoadedBag {
    /// Sum of the contained cuboids' volumes
    pub fn payload_volume(&self) -> i64 {
        self.cuboids
            .iter()
            .fold(0i64, |acc, c| acc.saturating_add(c.payload_volume()))
    }

    /// Capacity minus payload. Negative only if the bag was already overfilled.
    pub fn available_volume(&self) -> i64 {
        self.bag.volume.saturating_sub(self.payload_volume())
    }
}

/// Decide whether `candidate` may be added to `bag`.
///
/// `bag` is `None` when the lookup by the candidate's bag id found nothing.
pub fn validate_create(bag: Option<&LoadedBag>, candidate: &impl Payload) -> Result<()> {
    let bag = bag.ok_or(ServerError::BagNotFound)?;

    if bag.bag.disabled {
        return Err(ServerError::BagDisabled);
    }
    if bag.available_volume() < candidate.payload_volume() {
        return Err(ServerError::InsufficientCapacity);
    }
    Ok(())
}

/// Decide whether `existing` may be resized to `update` inside `bag`.
///
/// The cuboid's current volume is returned to the bag before the new volume
/// is checked. Disabled bags are not checked here: resizing a cuboid that is
/// already inside a disabled bag is allowed.
pub fn validate_update(
    bag: Option<&LoadedBag>,
    existing: &cuboid::Model,
    update: &impl Payload,
) -> Result<()> {
    let bag = bag.ok_or(ServerError::BagNotFound)?;

    let available = bag.available_volume().saturating_add(existing.payload_volume());
    if available < update.payload_volume() {
        return Err(ServerError::InsufficientCapacity);
    }
    Ok(())
}
