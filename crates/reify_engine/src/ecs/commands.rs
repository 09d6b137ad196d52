//! Deferred structural changes
//!
//! Systems see the registry through a [`SystemContext`](super::SystemContext)
//! that allows component reads and writes but no structural changes. Spawning,
//! despawning and adding or removing components are queued here instead and
//! applied by the scene between passes, in the order they were queued.

use super::component::Component;
use super::entity::Entity;
use super::registry::ComponentRegistry;

type Command = Box<dyn FnOnce(&mut ComponentRegistry)>;

/// Queue of structural changes waiting to be applied to a registry
#[derive(Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary registry operation
    pub fn push<F>(&mut self, command: F)
    where
        F: FnOnce(&mut ComponentRegistry) + 'static,
    {
        self.queue.push(Box::new(command));
    }

    /// Queue creation of an entity; `init` runs right after it is created
    pub fn spawn<F>(&mut self, tag: impl Into<String>, init: F)
    where
        F: FnOnce(&mut ComponentRegistry, &Entity) + 'static,
    {
        let tag = tag.into();
        self.push(move |registry| {
            let entity = registry.create_entity(&tag);
            init(registry, &entity);
        });
    }

    /// Queue removal of an entity
    pub fn remove_entity(&mut self, entity: &Entity) {
        let entity = entity.clone();
        self.push(move |registry| {
            registry.remove_entity(&entity);
        });
    }

    /// Queue attaching a component
    pub fn add_component<T: Component>(&mut self, entity: &Entity, component: T) {
        let entity = entity.clone();
        self.push(move |registry| {
            registry.add_component(&entity, component);
        });
    }

    /// Queue detaching a component
    pub fn remove_component<T: Component>(&mut self, entity: &Entity) {
        let entity = entity.clone();
        self.push(move |registry| {
            registry.remove_component::<T>(&entity);
        });
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Apply and drain every queued command in order; returns how many ran
    pub fn apply(&mut self, registry: &mut ComponentRegistry) -> usize {
        let queued = std::mem::take(&mut self.queue);
        let count = queued.len();
        for command in queued {
            command(registry);
        }
        if count > 0 {
            log::trace!("Applied {} deferred commands", count);
        }
        count
    }
}

impl std::fmt::Debug for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Commands").field("queued", &self.queue.len()).finish()
    }
}
