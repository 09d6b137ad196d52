//! Lighting component for ECS
//!
//! Pure data component; the light is positioned at its entity's transform
//! centre plus `offset` by the lighting system.

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// 2D point light attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct LightComponent {
    /// RGBA colour, each channel in 0.0 to 1.0
    pub color: [f32; 4],
    /// Reach of the light in world units
    pub distance: f32,
    /// Offset from the transform centre
    pub offset: Vec2,
    /// Whether the light is currently enabled
    pub enabled: bool,
}

impl Component for LightComponent {}

impl LightComponent {
    /// Create an enabled white light with the given reach
    pub fn new(distance: f32) -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            distance,
            offset: Vec2::zeros(),
            enabled: true,
        }
    }

    /// Set the colour (builder pattern)
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}
