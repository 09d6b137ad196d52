//! Entity-Component-System implementation
//!
//! Entities are ids with a tag, components are typed records stored in the
//! [`ComponentRegistry`], and systems are per-frame behaviour driven in
//! priority order by the [`SystemScheduler`]. A scene owns one of each.

pub mod commands;
pub mod component;
pub mod components;
pub mod entity;
pub mod registry;
pub mod scheduler;
pub mod system;
pub mod systems;

pub use commands::Commands;
pub use component::{Component, ComponentType};
pub use entity::{Entity, EntityId};
pub use registry::ComponentRegistry;
pub use scheduler::{SystemPass, SystemScheduler};
pub use system::{AsAny, System, SystemContext, SystemError};
