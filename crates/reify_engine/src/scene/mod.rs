//! # Scene
//!
//! A scene owns everything one simulation needs: the component registry,
//! the system scheduler, the deferred command queue and the fixed-step
//! accumulator. The driver calls [`Scene::update`] once per frame with the
//! wall-clock delta; the scene runs as many fixed passes as the accumulated
//! time allows, then one variable pass.
//!
//! ## Frame Order
//!
//! ```text
//! update(dt)
//!   accumulator += dt
//!   while accumulator >= fixed_interval:
//!       fixed pass (every enabled system, ascending priority)
//!       apply deferred commands
//!       accumulator -= fixed_interval
//!   variable pass with dt
//!   apply deferred commands
//! ```
//!
//! ## Lifecycle
//!
//! A scene is active until [`Scene::dispose`] is called. Disposal releases
//! every system exactly once and is permanent: later updates fail with
//! [`SceneError::Disposed`] and later disposals are no-ops.

mod scene_manager;
mod simulation;

pub use scene_manager::{SceneStack, SceneStackError};
pub use simulation::SimulationLoop;

use crate::config::{ConfigError, SimulationConfig};
use crate::ecs::{
    Commands, Component, ComponentRegistry, ComponentType, Entity, EntityId, System, SystemContext,
    SystemError, SystemPass, SystemScheduler,
};
use crate::events::{EventPublisher, SubscriptionId};
use std::any::TypeId;

/// Errors returned by scene operations
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// The scene was disposed and can no longer be updated
    #[error("Scene has been disposed")]
    Disposed,

    /// Frame delta was negative, NaN or infinite
    #[error("Invalid delta time: {0}")]
    InvalidDeltaTime(f32),

    /// A system failed while being disposed
    #[error("System error: {0}")]
    System(#[from] SystemError),
}

/// Screen dimensions published on resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

/// A self-contained simulation: entities, components and the systems that drive them
pub struct Scene {
    name: String,
    registry: ComponentRegistry,
    scheduler: SystemScheduler,
    commands: Commands,
    simulation: SimulationLoop,
    resize_publisher: EventPublisher<ScreenSize>,
    screen_size: Option<ScreenSize>,
    disposed: bool,
}

impl Scene {
    /// Create an empty scene with the default fixed interval
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(name.into(), SimulationLoop::default())
    }

    /// Create an empty scene with a validated simulation configuration
    pub fn with_config(name: impl Into<String>, config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(name.into(), SimulationLoop::from_config(config)))
    }

    fn from_parts(name: String, simulation: SimulationLoop) -> Self {
        log::info!(
            "Created scene '{}' (fixed interval {}s)",
            name,
            simulation.fixed_interval()
        );
        Self {
            name,
            registry: ComponentRegistry::new(),
            scheduler: SystemScheduler::new(),
            commands: Commands::new(),
            simulation,
            resize_publisher: EventPublisher::new(),
            screen_size: None,
            disposed: false,
        }
    }

    /// Scene name, for logs
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- systems --

    /// Register a system and run its `on_added_to_scene` hook
    ///
    /// Returns `false` without calling any hook if a system of the same type
    /// is already registered or the scene has been disposed.
    pub fn add_system<T: System>(&mut self, system: T) -> bool {
        if self.disposed {
            log::warn!("Scene '{}' is disposed; rejecting {}", self.name, system.name());
            return false;
        }
        if !self.scheduler.insert(system) {
            return false;
        }
        if let Some(system) = self.scheduler.get_dyn_mut(TypeId::of::<T>()) {
            let mut ctx = SystemContext::new(&mut self.registry, &mut self.commands);
            system.on_added_to_scene(&mut ctx);
        }
        self.commands.apply(&mut self.registry);
        true
    }

    /// Run a system's `on_removed_from_scene` hook and hand the system back
    pub fn remove_system<T: System>(&mut self) -> Option<T> {
        let system = self.scheduler.get_dyn_mut(TypeId::of::<T>())?;
        let mut ctx = SystemContext::new(&mut self.registry, &mut self.commands);
        system.on_removed_from_scene(&mut ctx);

        let removed = self.scheduler.remove::<T>();
        self.commands.apply(&mut self.registry);
        removed
    }

    /// Borrow a system by type
    pub fn get_system<T: System>(&self) -> Option<&T> {
        self.scheduler.get::<T>()
    }

    /// Mutably borrow a system by type
    pub fn get_system_mut<T: System>(&mut self) -> Option<&mut T> {
        self.scheduler.get_mut::<T>()
    }

    /// Whether a system of type `T` is registered
    pub fn has_system<T: System>(&self) -> bool {
        self.scheduler.contains::<T>()
    }

    /// Enable or disable a system; disabled systems skip both passes
    pub fn set_system_enabled<T: System>(&mut self, enabled: bool) -> bool {
        self.scheduler.set_enabled::<T>(enabled)
    }

    /// Registered system names in execution order
    pub fn system_order(&self) -> Vec<&'static str> {
        self.scheduler.execution_order()
    }

    // -- entities and components --

    /// Create an entity with the given tag
    pub fn create_entity(&mut self, tag: &str) -> Entity {
        self.registry.create_entity(tag)
    }

    /// Create `count` entities sharing a tag
    pub fn create_entities(&mut self, count: usize, tag: &str) -> Vec<Entity> {
        (0..count).map(|_| self.registry.create_entity(tag)).collect()
    }

    /// Remove an entity and all of its components
    pub fn remove_entity(&mut self, entity: &Entity) -> bool {
        self.registry.remove_entity(entity)
    }

    /// Remove several entities; returns how many were actually removed
    pub fn remove_entities(&mut self, entities: &[Entity]) -> usize {
        entities
            .iter()
            .filter(|entity| self.registry.remove_entity(entity))
            .count()
    }

    /// Whether the entity is alive in this scene
    pub fn has_entity(&self, entity: &Entity) -> bool {
        self.registry.contains(entity)
    }

    /// Look an entity up by id
    pub fn entity_by_id(&self, id: EntityId) -> Option<Entity> {
        self.registry.entity_by_id(id)
    }

    /// Entities created with `tag`
    pub fn entities_by_tag(&self, tag: &str) -> Vec<Entity> {
        self.registry.entities_by_tag(tag)
    }

    /// Attach a component; the first component of a type wins
    pub fn add_component<T: Component>(&mut self, entity: &Entity, component: T) -> bool {
        self.registry.add_component(entity, component)
    }

    /// Detach a component and return it
    pub fn remove_component<T: Component>(&mut self, entity: &Entity) -> Option<T> {
        self.registry.remove_component::<T>(entity)
    }

    /// Borrow a component
    pub fn get_component<T: Component>(&self, entity: &Entity) -> Option<&T> {
        self.registry.get_component(entity)
    }

    /// Mutably borrow a component
    pub fn get_component_mut<T: Component>(&mut self, entity: &Entity) -> Option<&mut T> {
        self.registry.get_component_mut(entity)
    }

    /// Whether the entity holds a `T`
    pub fn has_component<T: Component>(&self, entity: &Entity) -> bool {
        self.registry.has_component::<T>(entity)
    }

    /// Entities holding every listed component type, ordered by id
    pub fn filter(&self, types: &[ComponentType]) -> Vec<Entity> {
        self.registry.filter(types)
    }

    /// Read-only registry access
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Direct registry access for setup code
    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    // -- frame driving --

    /// Advance the scene by one frame of `delta_time` seconds
    pub fn update(&mut self, delta_time: f32) -> Result<(), SceneError> {
        self.ensure_active()?;
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(SceneError::InvalidDeltaTime(delta_time));
        }

        self.simulation.accumulate(f64::from(delta_time));
        let fixed_delta = self.fixed_delta();
        while self.simulation.consume_step() {
            self.run_pass(SystemPass::Fixed, fixed_delta);
        }
        self.run_pass(SystemPass::Variable, delta_time);
        Ok(())
    }

    /// Run exactly one fixed pass, bypassing the accumulator
    pub fn fixed_update(&mut self) -> Result<(), SceneError> {
        self.ensure_active()?;
        let fixed_delta = self.fixed_delta();
        self.run_pass(SystemPass::Fixed, fixed_delta);
        Ok(())
    }

    /// Record the new screen size, notify resize observers and forward it to every system
    pub fn resize(&mut self, width: f32, height: f32) {
        let size = ScreenSize { width, height };
        log::debug!("Scene '{}' resized to {}x{}", self.name, width, height);
        self.screen_size = Some(size);
        self.resize_publisher.publish(&size);
        self.scheduler.resize(width, height);
    }

    /// Last size passed to [`Scene::resize`]
    pub fn screen_size(&self) -> Option<ScreenSize> {
        self.screen_size
    }

    /// Subscribe to resize notifications
    pub fn observe_resize<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ScreenSize) + 'static,
    {
        self.resize_publisher.subscribe(callback)
    }

    /// Cancel a resize subscription
    pub fn unobserve_resize(&mut self, id: SubscriptionId) -> bool {
        self.resize_publisher.unsubscribe(id)
    }

    /// Fixed-step accumulator state
    pub fn simulation(&self) -> &SimulationLoop {
        &self.simulation
    }

    /// Dispose every system and retire the scene
    ///
    /// Every system is disposed even if an earlier one fails; the first
    /// failure is returned. The scene is disposed either way.
    pub fn dispose(&mut self) -> Result<(), SceneError> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;

        let result = self.scheduler.dispose_all();
        self.resize_publisher.clear();
        self.commands = Commands::new();
        log::info!("Disposed scene '{}'", self.name);
        result.map_err(SceneError::from)
    }

    /// Whether [`Scene::dispose`] has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_active(&self) -> Result<(), SceneError> {
        if self.disposed {
            Err(SceneError::Disposed)
        } else {
            Ok(())
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fixed_delta(&self) -> f32 {
        self.simulation.fixed_interval() as f32
    }

    fn run_pass(&mut self, pass: SystemPass, delta_time: f32) {
        self.scheduler
            .run(pass, &mut self.registry, &mut self.commands, delta_time);
        self.commands.apply(&mut self.registry);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("entities", &self.registry.entity_count())
            .field("systems", &self.scheduler)
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TransformComponent;
    use crate::foundation::math::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingSystem {
        fixed: u32,
        variable: u32,
        added: u32,
        removed: u32,
    }

    impl System for CountingSystem {
        fn on_added_to_scene(&mut self, _ctx: &mut SystemContext<'_>) {
            self.added += 1;
        }

        fn on_removed_from_scene(&mut self, _ctx: &mut SystemContext<'_>) {
            self.removed += 1;
        }

        fn fixed_update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32, _entities: &[Entity]) {
            self.fixed += 1;
        }

        fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32, _entities: &[Entity]) {
            self.variable += 1;
        }
    }

    /// Spawns one entity when added and another on every fixed step
    struct Spawner;

    impl System for Spawner {
        fn on_added_to_scene(&mut self, ctx: &mut SystemContext<'_>) {
            ctx.commands().spawn("seed", |registry, entity| {
                registry.add_component(entity, TransformComponent::new(Vec2::zeros(), 1.0, 1.0));
            });
        }

        fn fixed_update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32, entities: &[Entity]) {
            assert!(ctx.commands().is_empty());
            ctx.commands().spawn("spawned", |_, _| {});
            assert_eq!(entities.len(), ctx.registry().entity_count());
        }
    }

    struct FailingDispose;

    impl System for FailingDispose {
        fn dispose(&mut self) -> Result<(), SystemError> {
            Err(SystemError::Other("backend lost".into()))
        }
    }

    #[test]
    fn test_update_runs_fixed_then_variable() {
        let mut scene = Scene::new("test");
        assert!(scene.add_system(CountingSystem::default()));
        assert!(!scene.add_system(CountingSystem::default()));

        scene.update(0.035).unwrap();
        let counts = scene.get_system::<CountingSystem>().unwrap();
        assert_eq!((counts.added, counts.fixed, counts.variable), (1, 3, 1));

        scene.fixed_update().unwrap();
        assert_eq!(scene.get_system::<CountingSystem>().unwrap().fixed, 4);

        let removed = scene.remove_system::<CountingSystem>().unwrap();
        assert_eq!(removed.removed, 1);
        assert!(!scene.has_system::<CountingSystem>());
        assert!(scene.remove_system::<CountingSystem>().is_none());
    }

    #[test]
    fn test_disabled_system_is_skipped() {
        let mut scene = Scene::new("test");
        scene.add_system(CountingSystem::default());
        assert!(scene.set_system_enabled::<CountingSystem>(false));

        scene.update(0.05).unwrap();
        let counts = scene.get_system::<CountingSystem>().unwrap();
        assert_eq!((counts.fixed, counts.variable), (0, 0));
        assert!(!scene.set_system_enabled::<Spawner>(true));
    }

    #[test]
    fn test_commands_apply_between_passes() {
        let mut scene = Scene::new("test");
        scene.add_system(Spawner);
        assert_eq!(scene.entities_by_tag("seed").len(), 1);

        scene.update(0.025).unwrap();
        assert_eq!(scene.entities_by_tag("spawned").len(), 2);
    }

    #[test]
    fn test_rejects_bad_delta_without_accumulating() {
        let mut scene = Scene::new("test");
        assert!(matches!(scene.update(-0.1), Err(SceneError::InvalidDeltaTime(_))));
        assert!(matches!(scene.update(f32::NAN), Err(SceneError::InvalidDeltaTime(_))));
        assert_eq!(scene.simulation().accumulator(), 0.0);
    }

    #[test]
    fn test_resize_is_recorded_and_published() {
        let mut scene = Scene::new("test");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = scene.observe_resize(move |size| sink.borrow_mut().push(*size));

        scene.resize(640.0, 480.0);
        assert_eq!(scene.screen_size(), Some(ScreenSize { width: 640.0, height: 480.0 }));
        assert_eq!(seen.borrow().len(), 1);

        assert!(scene.unobserve_resize(id));
        scene.resize(800.0, 600.0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_dispose_is_permanent_and_idempotent() {
        let mut scene = Scene::new("test");
        scene.add_system(FailingDispose);
        scene.add_system(CountingSystem::default());

        assert!(matches!(scene.dispose(), Err(SceneError::System(_))));
        assert!(scene.is_disposed());
        assert!(!scene.has_system::<CountingSystem>());
        assert!(scene.dispose().is_ok());
        assert!(matches!(scene.update(0.1), Err(SceneError::Disposed)));
        assert!(matches!(scene.fixed_update(), Err(SceneError::Disposed)));
    }

    #[test]
    fn test_disposed_scene_rejects_systems() {
        let mut scene = Scene::new("test");
        scene.dispose().unwrap();

        assert!(!scene.add_system(CountingSystem::default()));
        assert!(!scene.has_system::<CountingSystem>());
    }

    #[test]
    fn test_with_config_validates() {
        let config = SimulationConfig { fixed_interval: 0.0 };
        assert!(Scene::with_config("bad", &config).is_err());

        let config = SimulationConfig { fixed_interval: 0.02 };
        let scene = Scene::with_config("good", &config).unwrap();
        assert_eq!(scene.name(), "good");
        assert!((scene.simulation().fixed_interval() - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_entity_helpers() {
        let mut scene = Scene::new("test");
        let rocks = scene.create_entities(3, "rock");
        let ship = scene.create_entity("ship");
        assert!(scene.add_component(&ship, TransformComponent::default()));

        assert_eq!(scene.entities_by_tag("rock"), rocks);
        assert_eq!(scene.entity_by_id(ship.id()), Some(ship.clone()));
        assert_eq!(scene.filter(&[ComponentType::of::<TransformComponent>()]), vec![ship.clone()]);

        assert_eq!(scene.remove_entities(&rocks), 3);
        assert_eq!(scene.remove_entities(&rocks), 0);
        assert!(scene.remove_component::<TransformComponent>(&ship).is_some());
        assert!(!scene.has_component::<TransformComponent>(&ship));
        assert!(scene.has_entity(&ship));
    }
}
