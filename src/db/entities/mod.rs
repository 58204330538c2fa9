//! Database entities

pub mod bag;
pub mod cuboid;
