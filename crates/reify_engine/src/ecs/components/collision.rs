//! Collision detection components for ECS

use crate::ecs::Component;
use crate::foundation::math::Vec2;
use crate::physics::collision::{CollisionShape, WorldSpaceShape};
use crate::physics::CollisionLayers;

/// Component that marks an entity as taking part in collision detection
///
/// The shape is stored in local space. Each fixed step the collision system
/// anchors it at the transform centre plus `offset` and caches the result in
/// `world_shape`.
#[derive(Debug, Clone, PartialEq)]
pub struct HitboxComponent {
    /// The collision shape (rectangle, circle or convex polygon)
    pub shape: CollisionShape,

    /// Offset of the shape anchor from the transform centre
    pub offset: Vec2,

    /// Layers this hitbox sits on
    pub layer: CollisionLayers,

    /// Layers this hitbox collides with
    pub mask: CollisionLayers,

    /// World-space shape resolved by the last collision step
    pub world_shape: Option<WorldSpaceShape>,
}

impl Component for HitboxComponent {}

impl HitboxComponent {
    /// Create a hitbox on all layers, colliding with all layers
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            offset: Vec2::zeros(),
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
            world_shape: None,
        }
    }

    /// Set the anchor offset (builder pattern)
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Create a hitbox with specific layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }
}
