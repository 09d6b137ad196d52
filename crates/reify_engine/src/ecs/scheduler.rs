//! System scheduling
//!
//! Provides deterministic execution order for the systems of one scene.
//! Systems are unique by type and run in ascending priority; systems with
//! equal priority keep the order in which they were added.

use super::commands::Commands;
use super::registry::ComponentRegistry;
use super::system::{AsAny, System, SystemContext, SystemError};
use std::any::TypeId;

/// The two passes a frame is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPass {
    /// Fixed-interval simulation step
    Fixed,
    /// Once-per-frame variable step
    Variable,
}

struct SystemEntry {
    type_id: TypeId,
    name: &'static str,
    priority: i16,
    sequence: u64,
    enabled: bool,
    system: Box<dyn System>,
}

/// Priority-ordered set of systems, one per type
#[derive(Default)]
pub struct SystemScheduler {
    entries: Vec<SystemEntry>,
    next_sequence: u64,
}

impl SystemScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system. Returns `false` and drops `system` if one of the same type exists.
    pub fn insert<T: System>(&mut self, system: T) -> bool {
        let type_id = TypeId::of::<T>();
        if self.contains_type(type_id) {
            log::debug!("System {} already registered; ignoring duplicate", system.name());
            return false;
        }

        let entry = SystemEntry {
            type_id,
            name: system.name(),
            priority: system.priority(),
            sequence: self.next_sequence,
            enabled: true,
            system: Box::new(system),
        };
        self.next_sequence += 1;

        log::debug!("Registered system {} (priority {})", entry.name, entry.priority);
        self.entries.push(entry);
        // Stable sort; the sequence key keeps insertion order for equal priorities
        self.entries.sort_by_key(|entry| (entry.priority, entry.sequence));
        true
    }

    /// Remove a system and hand it back
    pub fn remove<T: System>(&mut self) -> Option<T> {
        let index = self.index_of(TypeId::of::<T>())?;
        let entry = self.entries.remove(index);
        log::debug!("Unregistered system {}", entry.name);

        AsAny::into_any(entry.system)
            .downcast::<T>()
            .ok()
            .map(|system| *system)
    }

    /// Whether a system of type `T` is registered
    pub fn contains<T: System>(&self) -> bool {
        self.contains_type(TypeId::of::<T>())
    }

    /// Whether a system with the given type id is registered
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.index_of(type_id).is_some()
    }

    /// Borrow a system by type
    pub fn get<T: System>(&self) -> Option<&T> {
        let index = self.index_of(TypeId::of::<T>())?;
        AsAny::as_any(&*self.entries[index].system).downcast_ref::<T>()
    }

    /// Mutably borrow a system by type
    pub fn get_mut<T: System>(&mut self) -> Option<&mut T> {
        let index = self.index_of(TypeId::of::<T>())?;
        AsAny::as_any_mut(&mut *self.entries[index].system).downcast_mut::<T>()
    }

    /// Borrow a system through the trait object
    pub fn get_dyn_mut(&mut self, type_id: TypeId) -> Option<&mut dyn System> {
        let index = self.index_of(type_id)?;
        Some(&mut *self.entries[index].system)
    }

    /// Enable or disable a system. Returns `false` if it is not registered.
    pub fn set_enabled<T: System>(&mut self, enabled: bool) -> bool {
        let Some(index) = self.index_of(TypeId::of::<T>()) else {
            return false;
        };
        let entry = &mut self.entries[index];
        if entry.enabled != enabled {
            log::debug!("System {} {}", entry.name, if enabled { "enabled" } else { "disabled" });
        }
        entry.enabled = enabled;
        true
    }

    /// Whether a registered system is enabled
    pub fn is_enabled<T: System>(&self) -> Option<bool> {
        self.index_of(TypeId::of::<T>())
            .map(|index| self.entries[index].enabled)
    }

    /// Names of the registered systems in execution order
    pub fn execution_order(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run one pass over every enabled system in priority order
    ///
    /// Each system receives the entities matching its filter at the moment
    /// its turn comes, so component values written by earlier systems in the
    /// same pass are visible to later ones.
    pub fn run(
        &mut self,
        pass: SystemPass,
        registry: &mut ComponentRegistry,
        commands: &mut Commands,
        delta_time: f32,
    ) {
        for entry in self.entries.iter_mut().filter(|entry| entry.enabled) {
            let entities = registry.filter(entry.system.filter());
            let mut ctx = SystemContext::new(registry, commands);
            match pass {
                SystemPass::Fixed => entry.system.fixed_update(&mut ctx, delta_time, &entities),
                SystemPass::Variable => entry.system.update(&mut ctx, delta_time, &entities),
            }
        }
    }

    /// Forward a viewport change to every system, enabled or not
    pub fn resize(&mut self, width: f32, height: f32) {
        for entry in &mut self.entries {
            entry.system.resize(width, height);
        }
    }

    /// Dispose every system once, then drop them all
    ///
    /// A failing system does not stop the others from being disposed; the
    /// first failure is returned.
    pub fn dispose_all(&mut self) -> Result<(), SystemError> {
        let mut first_error = None;
        for mut entry in self.entries.drain(..) {
            if let Err(error) = entry.system.dispose() {
                log::error!("Failed to dispose system {}: {}", entry.name, error);
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn index_of(&self, type_id: TypeId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.type_id == type_id)
    }
}

impl std::fmt::Debug for SystemScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemScheduler")
            .field("systems", &self.execution_order())
            .finish()
    }
}
