//! ECS collision system wrapper
//!
//! Integrates the [`SpatialHashDetector`] with the scene: each fixed step it
//! resolves every hitbox to world space from its transform, caches the result
//! on the [`HitboxComponent`], runs the detector and publishes the reported
//! pairs to observers.

use crate::config::{CollisionConfig, ReportingMode};
use crate::ecs::components::{HitboxComponent, TransformComponent};
use crate::ecs::{ComponentType, Entity, System, SystemContext};
use crate::events::{EventPublisher, SubscriptionId};
use crate::foundation::math::Rect;
use crate::physics::{Collision, CollisionBody, CollisionError, SpatialHashDetector};
use std::collections::HashSet;

/// Spatial hash collision detector as a scene system
pub struct CollisionSystem {
    detector: SpatialHashDetector,
    publisher: EventPublisher<Collision>,
    priority: i16,
    filter: [ComponentType; 2],
}

impl CollisionSystem {
    /// Default priority; runs after movement
    pub const DEFAULT_PRIORITY: i16 = 120;

    /// Create a collision system; fails if the configured grid is invalid
    pub fn new(config: CollisionConfig) -> Result<Self, CollisionError> {
        Ok(Self {
            detector: SpatialHashDetector::new(config)?,
            publisher: EventPublisher::new(),
            priority: Self::DEFAULT_PRIORITY,
            filter: [
                ComponentType::of::<HitboxComponent>(),
                ComponentType::of::<TransformComponent>(),
            ],
        })
    }

    /// Collision system covering `width × height` at the origin with default settings
    pub fn with_size(width: f32, height: f32) -> Result<Self, CollisionError> {
        Self::new(CollisionConfig::with_size(width, height))
    }

    /// Override the priority (builder pattern)
    pub fn with_priority(mut self, priority: i16) -> Self {
        self.priority = priority;
        self
    }

    /// Register a callback for every reported collision
    pub fn observe_collisions<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Collision) + 'static,
    {
        self.publisher.subscribe(callback)
    }

    /// Remove a collision callback
    pub fn unobserve(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        self.detector.config()
    }

    /// Region covered by the grid
    pub fn bounding_box(&self) -> Rect {
        self.detector.bounding_box()
    }

    /// Replace the covered region
    pub fn set_bounding_box(&mut self, bounding_box: Rect) -> Result<(), CollisionError> {
        self.detector.set_bounding_box(bounding_box)
    }

    /// Move the covered region, keeping its size
    pub fn set_bounding_box_position(&mut self, x: f32, y: f32) -> Result<(), CollisionError> {
        let current = self.detector.bounding_box();
        self.detector
            .set_bounding_box(Rect::new(x, y, current.width, current.height))
    }

    /// Resize the covered region, keeping its position
    pub fn set_bounding_box_size(&mut self, width: f32, height: f32) -> Result<(), CollisionError> {
        let current = self.detector.bounding_box();
        self.detector
            .set_bounding_box(Rect::new(current.x, current.y, width, height))
    }

    /// Change the grid resolution
    pub fn set_grid_resolution(&mut self, columns: u32, rows: u32) -> Result<(), CollisionError> {
        self.detector.set_grid_resolution(columns, rows)
    }

    /// Current reporting mode
    pub fn reporting_mode(&self) -> ReportingMode {
        self.detector.reporting_mode()
    }

    /// Switch between continuous and on-enter reporting
    pub fn set_reporting_mode(&mut self, mode: ReportingMode) {
        self.detector.set_reporting_mode(mode);
    }

    /// Pairs overlapping as of the last fixed step
    pub fn current_collisions(&self) -> &HashSet<Collision> {
        self.detector.current_collisions()
    }

    /// Pairs that started overlapping in the last fixed step
    pub fn collisions_entered(&self) -> Vec<Collision> {
        self.detector.collisions_entered()
    }

    /// Pairs that stopped overlapping in the last fixed step
    pub fn collisions_exited(&self) -> Vec<Collision> {
        self.detector.collisions_exited()
    }

    /// Underlying detector
    pub fn detector(&self) -> &SpatialHashDetector {
        &self.detector
    }

    fn resolve_bodies(ctx: &mut SystemContext<'_>, entities: &[Entity]) -> Vec<CollisionBody> {
        let mut bodies = Vec::with_capacity(entities.len());
        for entity in entities {
            let Some((anchor, rotation)) = ctx
                .component::<TransformComponent>(entity)
                .map(|transform| (transform.center(), transform.rotation))
            else {
                continue;
            };
            let Some(hitbox) = ctx.component_mut::<HitboxComponent>(entity) else {
                continue;
            };

            let shape = hitbox.shape.to_world_space(anchor + hitbox.offset, rotation);
            hitbox.world_shape = Some(shape.clone());
            bodies.push(CollisionBody {
                entity: entity.clone(),
                shape,
                layer: hitbox.layer,
                mask: hitbox.mask,
            });
        }
        bodies
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "CollisionSystem"
    }

    fn priority(&self) -> i16 {
        self.priority
    }

    fn filter(&self) -> &[ComponentType] {
        &self.filter
    }

    fn fixed_update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32, entities: &[Entity]) {
        let bodies = Self::resolve_bodies(ctx, entities);
        for collision in self.detector.step(&bodies) {
            self.publisher.publish(&collision);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        if let Err(error) = self.set_bounding_box_size(width, height) {
            log::warn!("Ignoring collision grid resize to {}x{}: {}", width, height, error);
        }
    }

    fn dispose(&mut self) -> Result<(), crate::ecs::SystemError> {
        self.publisher.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Commands, ComponentRegistry};
    use crate::foundation::math::Vec2;
    use crate::physics::collision::{CollisionShape, WorldSpaceShape};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn spawn_box(registry: &mut ComponentRegistry, x: f32, y: f32) -> Entity {
        let entity = registry.create_entity("box");
        registry.add_component(&entity, TransformComponent::new(Vec2::new(x, y), 20.0, 20.0));
        registry.add_component(&entity, HitboxComponent::new(CollisionShape::rectangle(20.0, 20.0)));
        entity
    }

    fn step(system: &mut CollisionSystem, registry: &mut ComponentRegistry) {
        let mut commands = Commands::new();
        let entities = registry.filter(system.filter());
        let mut ctx = SystemContext::new(registry, &mut commands);
        system.fixed_update(&mut ctx, 0.01, &entities);
    }

    #[test]
    fn test_world_shape_written_back() {
        let mut registry = ComponentRegistry::new();
        let entity = spawn_box(&mut registry, 10.0, 10.0);
        if let Some(hitbox) = registry.get_component_mut::<HitboxComponent>(&entity) {
            hitbox.offset = Vec2::new(5.0, 0.0);
        }

        let mut system = CollisionSystem::with_size(600.0, 600.0).unwrap();
        step(&mut system, &mut registry);

        let hitbox = registry.get_component::<HitboxComponent>(&entity).unwrap();
        assert_eq!(
            hitbox.world_shape,
            Some(WorldSpaceShape::Rectangle(Rect::new(15.0, 10.0, 20.0, 20.0)))
        );
    }

    #[test]
    fn test_observers_receive_reported_pairs() {
        let mut registry = ComponentRegistry::new();
        let a = spawn_box(&mut registry, 10.0, 10.0);
        let b = spawn_box(&mut registry, 15.0, 15.0);
        spawn_box(&mut registry, 300.0, 300.0);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut system = CollisionSystem::with_size(600.0, 600.0).unwrap();
        let sink = Rc::clone(&seen);
        let id = system.observe_collisions(move |collision| sink.borrow_mut().push(collision.clone()));

        step(&mut system, &mut registry);
        assert_eq!(*seen.borrow(), vec![Collision::new(a.clone(), b.clone())]);

        assert!(system.unobserve(id));
        step(&mut system, &mut registry);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(system.current_collisions().len(), 1);
    }

    #[test]
    fn test_resize_rebuilds_or_keeps_grid() {
        let mut system = CollisionSystem::with_size(600.0, 600.0).unwrap();

        system.resize(1024.0, 768.0);
        assert_eq!(system.bounding_box(), Rect::new(0.0, 0.0, 1024.0, 768.0));

        system.resize(0.0, 768.0);
        assert_eq!(system.bounding_box(), Rect::new(0.0, 0.0, 1024.0, 768.0));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = CollisionConfig::with_size(100.0, 100.0);
        config.columns = 0;
        assert!(matches!(
            CollisionSystem::new(config),
            Err(CollisionError::InvalidGridResolution { columns: 0, .. })
        ));
    }
}
