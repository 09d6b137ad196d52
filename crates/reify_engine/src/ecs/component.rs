//! Component trait and type descriptors

use std::any::{type_name, TypeId};
use std::fmt;

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

/// Runtime descriptor of a component type, used by system filters
#[derive(Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    /// Descriptor for component type `T`
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name, for logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl std::hash::Hash for ComponentType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{HitboxComponent, TransformComponent};

    #[test]
    fn test_component_type_identity() {
        assert_eq!(ComponentType::of::<TransformComponent>(), ComponentType::of::<TransformComponent>());
        assert_ne!(ComponentType::of::<TransformComponent>(), ComponentType::of::<HitboxComponent>());
        assert_eq!(ComponentType::of::<HitboxComponent>().short_name(), "HitboxComponent");
    }
}
