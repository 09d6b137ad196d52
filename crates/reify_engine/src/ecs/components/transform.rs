//! Transform component for the ECS system
//!
//! Pure data component. `position` is the minimum (bottom-left) corner of
//! the entity's axis-aligned footprint in a Y-up world.

use crate::ecs::Component;
use crate::foundation::math::{Rect, Vec2};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Minimum corner of the footprint
    pub position: Vec2,

    /// Footprint extent along X
    pub width: f32,

    /// Footprint extent along Y
    pub height: f32,

    /// Rotation in radians, counter-clockwise
    pub rotation: f32,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
        }
    }
}

impl TransformComponent {
    /// Create an unrotated transform
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Set the rotation (builder pattern)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Footprint size
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Centre of the footprint
    pub fn center(&self) -> Vec2 {
        self.position + self.size() / 2.0
    }

    /// Axis-aligned footprint
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }
}
