//! ECS Systems module

pub mod collision_system;
pub mod debug_rendering;
pub mod lighting;
pub mod movement;
pub mod rendering_system;

pub use collision_system::CollisionSystem;
pub use debug_rendering::DebugRenderingSystem;
pub use lighting::LightingSystem;
pub use movement::{GravitySystem, MovementSystem};
pub use rendering_system::RenderingSystem;
