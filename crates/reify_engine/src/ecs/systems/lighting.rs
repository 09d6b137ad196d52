//! Lighting system for converting ECS entities to backend light data
//!
//! Each variable step, every enabled light is positioned at its entity's
//! transform centre plus the light's offset and handed to the
//! [`LightingBackend`] together with the camera.

use crate::ecs::components::{LightComponent, TransformComponent};
use crate::ecs::{ComponentType, Entity, System, SystemContext, SystemError};
use crate::render::{ActiveLight, Camera2D, LightingBackend};

/// Lighting system that processes light entities and feeds the backend
pub struct LightingSystem<B: LightingBackend> {
    backend: B,
    camera: Camera2D,
    priority: i16,
    filter: [ComponentType; 2],
    lights: Vec<ActiveLight>,
    released: bool,
}

impl<B: LightingBackend> LightingSystem<B> {
    /// Default priority; runs just before rendering
    pub const DEFAULT_PRIORITY: i16 = 126;

    /// Creates a lighting system rendering through `backend`
    pub fn new(backend: B, camera: Camera2D) -> Self {
        Self {
            backend,
            camera,
            priority: Self::DEFAULT_PRIORITY,
            filter: [
                ComponentType::of::<LightComponent>(),
                ComponentType::of::<TransformComponent>(),
            ],
            lights: Vec::new(),
            released: false,
        }
    }

    /// Mutable camera
    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    /// The backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Lights submitted in the last frame
    pub fn active_lights(&self) -> &[ActiveLight] {
        &self.lights
    }
}

impl<B: LightingBackend> System for LightingSystem<B> {
    fn name(&self) -> &'static str {
        "LightingSystem"
    }

    fn priority(&self) -> i16 {
        self.priority
    }

    fn filter(&self) -> &[ComponentType] {
        &self.filter
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32, entities: &[Entity]) {
        if self.released {
            return;
        }

        self.lights.clear();
        for entity in entities {
            let (Some(light), Some(transform)) = (
                ctx.component::<LightComponent>(entity),
                ctx.component::<TransformComponent>(entity),
            ) else {
                continue;
            };
            if !light.enabled {
                continue;
            }
            self.lights.push(ActiveLight {
                position: transform.center() + light.offset,
                color: light.color,
                distance: light.distance,
            });
        }

        if let Err(error) = self.backend.render(&self.camera, &self.lights) {
            log::error!("Lighting error: {}", error);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        self.backend.resize(width, height);
    }

    fn dispose(&mut self) -> Result<(), SystemError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.backend.release().map_err(|error| SystemError::ResourceRelease {
            system: "LightingSystem",
            reason: error.to_string(),
        })
    }
}
