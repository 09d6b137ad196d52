//! ECS Components module
//!
//! Contains all engine components. Components are plain data; behaviour
//! lives in systems.

pub mod collision;
pub mod debug;
pub mod lighting;
pub mod movement;
pub mod renderable;
pub mod transform;

pub use collision::HitboxComponent;
pub use debug::{DebugRenderComponent, DebugShape};
pub use lighting::LightComponent;
pub use movement::{GravityComponent, MovementComponent};
pub use renderable::RenderComponent;
pub use transform::TransformComponent;
