//! Physics module for collision detection
//!
//! Provides local and world-space collision shapes, layer filtering and the
//! spatial hash broad phase. There is no collision response; overlapping
//! pairs are only reported.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::{Circle, CollisionShape, ConvexPolygon, WorldSpaceShape};
pub use collision_layers::CollisionLayers;
pub use collision_system::{Collision, CollisionBody, CollisionError, SpatialHashDetector};
