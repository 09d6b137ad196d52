//! Entity implementation

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

slotmap::new_key_type! {
    /// Generational entity identifier
    ///
    /// Ids of removed entities are never handed out again with the same
    /// generation, so stale handles simply fail to resolve.
    pub struct EntityId;
}

/// Entity handle: a stable id plus the tag it was created with
///
/// Equality, hashing and ordering use the id only. Components are not stored
/// on the handle; they live in the [`ComponentRegistry`](super::ComponentRegistry).
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tag: Arc<str>,
}

impl Entity {
    pub(super) fn new(id: EntityId, tag: Arc<str>) -> Self {
        Self { id, tag }
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the tag the entity was created with
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
