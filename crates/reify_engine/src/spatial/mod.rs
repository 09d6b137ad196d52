//! Spatial partitioning data structures
//!
//! Provides the uniform grid used by the collision detector's broad phase.

mod spatial_hash;

pub use spatial_hash::{Cell, SpatialHashGrid};
