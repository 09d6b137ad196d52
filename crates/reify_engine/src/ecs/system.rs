//! System trait, execution context and system errors
//!
//! A system is per-frame behaviour with a priority, a component filter and a
//! set of lifecycle hooks. Every hook has a no-op default, so a system only
//! implements the hooks it cares about. The scheduler drives systems only
//! through this trait.
//!
//! Systems hold no reference back to their scene. Each hook that touches
//! the world receives a [`SystemContext`] borrowing the scene's registry and
//! its deferred command queue for the duration of the call.

use super::commands::Commands;
use super::component::{Component, ComponentType};
use super::entity::{Entity, EntityId};
use super::registry::ComponentRegistry;
use std::any::Any;

/// Upcast helper so boxed systems can be downcast back to their concrete type
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a boxed value into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Errors raised by systems
#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    /// An external resource could not be released
    #[error("{system} failed to release resources: {reason}")]
    ResourceRelease {
        /// Name of the failing system
        system: &'static str,
        /// Backend-provided reason
        reason: String,
    },

    /// Any other system failure
    #[error("{0}")]
    Other(String),
}

/// Per-frame behaviour driven by the scheduler
pub trait System: AsAny {
    /// Human-readable name used in logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Execution priority; lower values run first
    fn priority(&self) -> i16 {
        0
    }

    /// Component types an entity must hold to be passed to this system.
    /// An empty filter receives every entity.
    fn filter(&self) -> &[ComponentType] {
        &[]
    }

    /// Called once when the system joins a scene
    fn on_added_to_scene(&mut self, _ctx: &mut SystemContext<'_>) {}

    /// Called once when the system leaves a scene
    fn on_removed_from_scene(&mut self, _ctx: &mut SystemContext<'_>) {}

    /// Variable-rate update, once per frame
    fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32, _entities: &[Entity]) {}

    /// Fixed-rate update, zero or more times per frame
    fn fixed_update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32, _entities: &[Entity]) {}

    /// Viewport size changed
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Release external resources. Called at most once per scene.
    fn dispose(&mut self) -> Result<(), SystemError> {
        Ok(())
    }
}

/// World access handed to system hooks
///
/// Component values can be read and written directly. Structural changes
/// go through [`SystemContext::commands`] and are applied after the pass.
pub struct SystemContext<'a> {
    registry: &'a mut ComponentRegistry,
    commands: &'a mut Commands,
}

impl<'a> SystemContext<'a> {
    /// Borrow a registry and command queue for one hook call
    pub fn new(registry: &'a mut ComponentRegistry, commands: &'a mut Commands) -> Self {
        Self { registry, commands }
    }

    /// Read-only view of the registry
    pub fn registry(&self) -> &ComponentRegistry {
        self.registry
    }

    /// Borrow a component
    pub fn component<T: Component>(&self, entity: &Entity) -> Option<&T> {
        self.registry.get_component(entity)
    }

    /// Mutably borrow a component
    pub fn component_mut<T: Component>(&mut self, entity: &Entity) -> Option<&mut T> {
        self.registry.get_component_mut(entity)
    }

    /// Whether the entity holds a `T`
    pub fn has_component<T: Component>(&self, entity: &Entity) -> bool {
        self.registry.has_component::<T>(entity)
    }

    /// Look an entity up by id
    pub fn entity_by_id(&self, id: EntityId) -> Option<Entity> {
        self.registry.entity_by_id(id)
    }

    /// Entities created with `tag`
    pub fn entities_by_tag(&self, tag: &str) -> Vec<Entity> {
        self.registry.entities_by_tag(tag)
    }

    /// Entities holding every listed component type
    pub fn filter(&self, types: &[ComponentType]) -> Vec<Entity> {
        self.registry.filter(types)
    }

    /// Deferred structural changes
    pub fn commands(&mut self) -> &mut Commands {
        self.commands
    }
}
