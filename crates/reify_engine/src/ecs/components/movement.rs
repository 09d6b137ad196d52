//! Movement and gravity components
//!
//! Velocity-driven motion for dynamic objects, integrated on the fixed step
//! by [`MovementSystem`](crate::ecs::systems::MovementSystem).

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// Component for entities that can move
#[derive(Debug, Clone, PartialEq)]
pub struct MovementComponent {
    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Angular velocity in radians per second
    pub angular_velocity: f32,
}

impl Component for MovementComponent {}

impl Default for MovementComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementComponent {
    /// Create a stationary movement component
    pub fn new() -> Self {
        Self {
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
        }
    }

    /// Create a movement component with initial velocity
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Set angular velocity (builder pattern)
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }
}

/// Marks an entity as affected by the scene's gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityComponent {
    /// Multiplier applied to the gravity vector
    pub scale: f32,
}

impl Component for GravityComponent {}

impl Default for GravityComponent {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}
