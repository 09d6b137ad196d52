//! Movement and gravity systems
//!
//! Both integrate on the fixed step. Gravity runs first so velocity changes
//! are applied to position in the same step.

use crate::ecs::components::{GravityComponent, MovementComponent, TransformComponent};
use crate::ecs::{ComponentType, Entity, System, SystemContext};
use crate::foundation::math::Vec2;

/// Integrates velocity into transform position and rotation
pub struct MovementSystem {
    priority: i16,
    filter: [ComponentType; 2],
}

impl MovementSystem {
    /// Default priority; runs before collision detection
    pub const DEFAULT_PRIORITY: i16 = 100;

    /// Create a movement system at the default priority
    pub fn new() -> Self {
        Self::with_priority(Self::DEFAULT_PRIORITY)
    }

    /// Create a movement system at a custom priority
    pub fn with_priority(priority: i16) -> Self {
        Self {
            priority,
            filter: [
                ComponentType::of::<MovementComponent>(),
                ComponentType::of::<TransformComponent>(),
            ],
        }
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "MovementSystem"
    }

    fn priority(&self) -> i16 {
        self.priority
    }

    fn filter(&self) -> &[ComponentType] {
        &self.filter
    }

    fn fixed_update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32, entities: &[Entity]) {
        for entity in entities {
            let Some((velocity, angular_velocity)) = ctx
                .component::<MovementComponent>(entity)
                .map(|movement| (movement.velocity, movement.angular_velocity))
            else {
                continue;
            };

            if let Some(transform) = ctx.component_mut::<TransformComponent>(entity) {
                transform.position += velocity * delta_time;
                transform.rotation += angular_velocity * delta_time;
            }
        }
    }
}

/// Accelerates every entity holding a [`GravityComponent`]
pub struct GravitySystem {
    gravity: Vec2,
    priority: i16,
    filter: [ComponentType; 2],
}

impl GravitySystem {
    /// Default priority; runs before everything else
    pub const DEFAULT_PRIORITY: i16 = 1;

    /// Default downward acceleration
    pub const DEFAULT_GRAVITY: f32 = -98.0;

    /// Create a gravity system pulling along -Y
    pub fn new() -> Self {
        Self::with_gravity(Vec2::new(0.0, Self::DEFAULT_GRAVITY))
    }

    /// Create a gravity system with a custom acceleration vector
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            priority: Self::DEFAULT_PRIORITY,
            filter: [
                ComponentType::of::<GravityComponent>(),
                ComponentType::of::<MovementComponent>(),
            ],
        }
    }

    /// Current acceleration vector
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Change the acceleration vector
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }
}

impl Default for GravitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for GravitySystem {
    fn name(&self) -> &'static str {
        "GravitySystem"
    }

    fn priority(&self) -> i16 {
        self.priority
    }

    fn filter(&self) -> &[ComponentType] {
        &self.filter
    }

    fn fixed_update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32, entities: &[Entity]) {
        for entity in entities {
            let scale = ctx
                .component::<GravityComponent>(entity)
                .map_or(1.0, |gravity| gravity.scale);

            if let Some(movement) = ctx.component_mut::<MovementComponent>(entity) {
                movement.velocity += self.gravity * scale * delta_time;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Commands, ComponentRegistry};
    use approx::assert_relative_eq;

    #[test]
    fn test_movement_integrates_position_and_rotation() {
        let mut registry = ComponentRegistry::new();
        let mut commands = Commands::new();
        let entity = registry.create_entity("ship");
        registry.add_component(&entity, TransformComponent::new(Vec2::new(0.0, 0.0), 1.0, 1.0));
        registry.add_component(
            &entity,
            MovementComponent::with_velocity(Vec2::new(10.0, -5.0)).with_angular_velocity(2.0),
        );

        let mut system = MovementSystem::new();
        let entities = registry.filter(system.filter());
        let mut ctx = SystemContext::new(&mut registry, &mut commands);
        system.fixed_update(&mut ctx, 0.5, &entities);

        let transform = registry.get_component::<TransformComponent>(&entity).unwrap();
        assert_relative_eq!(transform.position, Vec2::new(5.0, -2.5));
        assert_relative_eq!(transform.rotation, 1.0);
    }

    #[test]
    fn test_gravity_scales_acceleration() {
        let mut registry = ComponentRegistry::new();
        let mut commands = Commands::new();
        let entity = registry.create_entity("rock");
        registry.add_component(&entity, MovementComponent::new());
        registry.add_component(&entity, GravityComponent { scale: 0.5 });

        let mut system = GravitySystem::new();
        let entities = registry.filter(system.filter());
        let mut ctx = SystemContext::new(&mut registry, &mut commands);
        system.fixed_update(&mut ctx, 0.1, &entities);

        let movement = registry.get_component::<MovementComponent>(&entity).unwrap();
        assert_relative_eq!(movement.velocity, Vec2::new(0.0, -4.9), epsilon = 1e-5);
    }
}
