//! Collision detection primitives and shapes
//!
//! # Architecture
//!
//! - **Local Space Storage**: hitbox shapes are stored relative to their entity
//! - **Per-Step Resolution**: shapes are resolved to world space once per fixed step
//! - **Strict Tests**: touching shapes never count as overlapping
//!
//! # Module Organization
//!
//! - [`primitives`] - Circles, convex polygons and their intersection tests
//! - [`shape`] - ECS-friendly local and world-space shape enums

pub mod primitives;
pub mod shape;

pub use primitives::{Circle, ConvexPolygon};
pub use shape::{CollisionShape, WorldSpaceShape};
