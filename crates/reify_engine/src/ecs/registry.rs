//! Component registry
//!
//! Owns every entity and component of a scene. Storage is one typed column
//! per component type, keyed by [`TypeId`] and downcast behind the typed
//! accessors below. Each column is a `BTreeMap` keyed by entity id, so the
//! column's key set doubles as the type → entity membership index and
//! iteration order is always ascending entity id.
//!
//! Alongside the columns the registry keeps the id index (a generational
//! slot map) and the tag index. All three are updated together by every
//! structural operation, so they can never disagree.

use super::component::{Component, ComponentType};
use super::entity::{Entity, EntityId};
use slotmap::SlotMap;
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Type-erased view of one component column
trait ComponentColumn {
    fn component_type(&self) -> ComponentType;
    fn contains(&self, id: EntityId) -> bool;
    fn remove_entity(&mut self, id: EntityId) -> bool;
    fn ids(&self) -> Box<dyn Iterator<Item = EntityId> + '_>;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct TypedColumn<T: Component> {
    values: BTreeMap<EntityId, T>,
}

impl<T: Component> TypedColumn<T> {
    fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<T: Component> ComponentColumn for TypedColumn<T> {
    fn component_type(&self) -> ComponentType {
        ComponentType::of::<T>()
    }

    fn contains(&self, id: EntityId) -> bool {
        self.values.contains_key(&id)
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.values.remove(&id).is_some()
    }

    fn ids(&self) -> Box<dyn Iterator<Item = EntityId> + '_> {
        Box::new(self.values.keys().copied())
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Entity, component and tag storage for one scene
#[derive(Default)]
pub struct ComponentRegistry {
    entities: SlotMap<EntityId, Entity>,
    columns: HashMap<TypeId, Box<dyn ComponentColumn>>,
    tags: HashMap<Arc<str>, BTreeSet<EntityId>>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity with the given tag and no components
    pub fn create_entity(&mut self, tag: &str) -> Entity {
        let tag: Arc<str> = self
            .tags
            .get_key_value(tag)
            .map_or_else(|| Arc::from(tag), |(existing, _)| Arc::clone(existing));

        let id = self
            .entities
            .insert_with_key(|id| Entity::new(id, Arc::clone(&tag)));
        self.tags.entry(Arc::clone(&tag)).or_default().insert(id);

        log::debug!("Created entity {:?} tagged '{}'", id, tag);
        self.entities[id].clone()
    }

    /// Remove an entity and every component it holds
    ///
    /// Returns `false` if the entity is unknown (never created or already removed).
    pub fn remove_entity(&mut self, entity: &Entity) -> bool {
        let Some(removed) = self.entities.remove(entity.id()) else {
            return false;
        };

        for column in self.columns.values_mut() {
            column.remove_entity(removed.id());
        }

        if let Some(ids) = self.tags.get_mut(removed.tag()) {
            ids.remove(&removed.id());
            if ids.is_empty() {
                self.tags.remove(removed.tag());
            }
        }

        log::debug!("Removed entity {:?} tagged '{}'", removed.id(), removed.tag());
        true
    }

    /// Whether the entity is still alive in this registry
    pub fn contains(&self, entity: &Entity) -> bool {
        self.entities.contains_key(entity.id())
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Look an entity up by id
    pub fn entity_by_id(&self, id: EntityId) -> Option<Entity> {
        self.entities.get(id).cloned()
    }

    /// All entities created with `tag`, ordered by id
    pub fn entities_by_tag(&self, tag: &str) -> Vec<Entity> {
        self.tags
            .get(tag)
            .map(|ids| ids.iter().filter_map(|&id| self.entity_by_id(id)).collect())
            .unwrap_or_default()
    }

    /// All live entities, ordered by id
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.entities.values().cloned().collect();
        entities.sort();
        entities
    }

    /// Attach a component
    ///
    /// Returns `false` and leaves the registry untouched if the entity is
    /// unknown or already holds a component of this type.
    pub fn add_component<T: Component>(&mut self, entity: &Entity, component: T) -> bool {
        if !self.contains(entity) {
            return false;
        }

        let column = self
            .columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(TypedColumn::<T>::new()));

        let Some(column) = column.as_any_mut().downcast_mut::<TypedColumn<T>>() else {
            return false;
        };

        match column.values.entry(entity.id()) {
            std::collections::btree_map::Entry::Occupied(_) => {
                log::debug!(
                    "Entity {:?} already has {}; keeping the existing value",
                    entity.id(),
                    ComponentType::of::<T>().short_name()
                );
                false
            }
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(component);
                true
            }
        }
    }

    /// Detach a component and hand it back
    pub fn remove_component<T: Component>(&mut self, entity: &Entity) -> Option<T> {
        self.column_mut::<T>()?.values.remove(&entity.id())
    }

    /// Borrow a component
    pub fn get_component<T: Component>(&self, entity: &Entity) -> Option<&T> {
        self.column::<T>()?.values.get(&entity.id())
    }

    /// Mutably borrow a component
    pub fn get_component_mut<T: Component>(&mut self, entity: &Entity) -> Option<&mut T> {
        self.column_mut::<T>()?.values.get_mut(&entity.id())
    }

    /// Whether the entity holds a component of type `T`
    pub fn has_component<T: Component>(&self, entity: &Entity) -> bool {
        self.has_component_type(entity, ComponentType::of::<T>())
    }

    /// Whether the entity holds a component of the described type
    pub fn has_component_type(&self, entity: &Entity, component_type: ComponentType) -> bool {
        self.columns
            .get(&component_type.id())
            .is_some_and(|column| column.contains(entity.id()))
    }

    /// Component types currently attached to an entity
    pub fn component_types(&self, entity: &Entity) -> Vec<ComponentType> {
        self.columns
            .values()
            .filter(|column| column.contains(entity.id()))
            .map(|column| column.component_type())
            .collect()
    }

    /// Number of entities holding a component of type `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.columns
            .get(&TypeId::of::<T>())
            .map_or(0, |column| column.len())
    }

    /// Entities holding every listed component type, ordered by id
    ///
    /// Starts from the first type's membership and intersects with the rest,
    /// so the result is independent of the order of `types`. An empty list
    /// matches every entity.
    pub fn filter(&self, types: &[ComponentType]) -> Vec<Entity> {
        let Some((first, rest)) = types.split_first() else {
            return self.entities();
        };

        let Some(seed) = self.columns.get(&first.id()) else {
            return Vec::new();
        };

        let mut others = Vec::with_capacity(rest.len());
        for component_type in rest {
            match self.columns.get(&component_type.id()) {
                Some(column) => others.push(column),
                None => return Vec::new(),
            }
        }

        seed.ids()
            .filter(|&id| others.iter().all(|column| column.contains(id)))
            .filter_map(|id| self.entity_by_id(id))
            .collect()
    }

    /// Remove every entity and component
    pub fn clear(&mut self) {
        self.entities.clear();
        self.columns.clear();
        self.tags.clear();
    }

    fn column<T: Component>(&self) -> Option<&TypedColumn<T>> {
        self.columns
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<TypedColumn<T>>()
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut TypedColumn<T>> {
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<TypedColumn<T>>()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("entities", &self.entities.len())
            .field("component_types", &self.columns.len())
            .field("tags", &self.tags.len())
            .finish()
    }
}
