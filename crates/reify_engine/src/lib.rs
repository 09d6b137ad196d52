//! # Reify Engine
//!
//! A frame-driven entity-component-system simulation core for 2D games.
//!
//! ## Features
//!
//! - **ECS Architecture**: tagged entities, type-indexed components and
//!   priority-ordered systems with deferred structural changes
//! - **Fixed Timestep**: deterministic fixed passes from an accumulator,
//!   followed by one variable pass per frame
//! - **Collision Detection**: spatial hash broad phase with exact
//!   rectangle, circle and convex polygon tests
//! - **Backend Seams**: rendering and lighting systems drive pluggable
//!   backends and never touch pixels themselves
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reify_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new("game");
//!     scene.add_system(GravitySystem::new());
//!     scene.add_system(MovementSystem::new());
//!     scene.add_system(CollisionSystem::with_size(800.0, 600.0)?);
//!
//!     let rock = scene.create_entity("rock");
//!     scene.add_component(&rock, TransformComponent::new(Vec2::new(100.0, 500.0), 32.0, 32.0));
//!     scene.add_component(&rock, MovementComponent::default());
//!     scene.add_component(&rock, GravityComponent::default());
//!     scene.add_component(&rock, HitboxComponent::new(CollisionShape::rectangle(32.0, 32.0)));
//!
//!     for _ in 0..60 {
//!         scene.update(1.0 / 60.0)?;
//!     }
//!     scene.dispose()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, EngineConfig, ReportingMode, SimulationConfig},
        ecs::{
            components::{
                DebugRenderComponent, DebugShape, GravityComponent, HitboxComponent, LightComponent,
                MovementComponent, RenderComponent, TransformComponent,
            },
            systems::{
                CollisionSystem, DebugRenderingSystem, GravitySystem, LightingSystem, MovementSystem,
                RenderingSystem,
            },
            Commands, Component, ComponentType, Entity, EntityId, System, SystemContext, SystemError,
        },
        events::{EventPublisher, SubscriptionId},
        foundation::math::{Rect, Vec2},
        input::{InputEvent, InputManager, KeyCode},
        physics::{Collision, CollisionLayers, CollisionShape, WorldSpaceShape},
        render::{
            ActiveLight, Camera2D, DebugDrawBackend, DebugDrawRequest, DebugOutline, DrawRequest,
            LightingBackend, RenderBackend, TextureHandle,
        },
        scene::{Scene, SceneError, SceneStack, SceneStackError, ScreenSize},
    };
}
