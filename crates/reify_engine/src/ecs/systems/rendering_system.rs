//! # Rendering System
//!
//! Collects visible sprites each variable step and submits them to a
//! [`RenderBackend`]. Entities whose transform footprint lies outside the
//! camera's viewable area are culled; the survivors are drawn in ascending
//! depth, with ties keeping entity order.

use crate::ecs::components::{RenderComponent, TransformComponent};
use crate::ecs::{ComponentType, Entity, System, SystemContext, SystemError};
use crate::render::{Camera2D, DrawRequest, RenderBackend};

/// System responsible for culling, sorting and submitting sprites
pub struct RenderingSystem<B: RenderBackend> {
    backend: B,
    camera: Camera2D,
    priority: i16,
    filter: [ComponentType; 2],
    draw_list: Vec<DrawRequest>,
    released: bool,
}

impl<B: RenderBackend> RenderingSystem<B> {
    /// Default priority; runs after everything but lighting
    pub const DEFAULT_PRIORITY: i16 = 127;

    /// Create a rendering system drawing through `backend`
    pub fn new(backend: B, camera: Camera2D) -> Self {
        Self {
            backend,
            camera,
            priority: Self::DEFAULT_PRIORITY,
            filter: [
                ComponentType::of::<RenderComponent>(),
                ComponentType::of::<TransformComponent>(),
            ],
            draw_list: Vec::new(),
            released: false,
        }
    }

    /// Camera used for culling
    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Mutable camera, e.g. to follow a player
    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    /// The backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Requests submitted in the last frame, in draw order
    pub fn last_frame(&self) -> &[DrawRequest] {
        &self.draw_list
    }

    fn collect(&mut self, ctx: &SystemContext<'_>, entities: &[Entity]) {
        let viewable_area = self.camera.viewable_area();
        self.draw_list.clear();

        for entity in entities {
            let (Some(render), Some(transform)) = (
                ctx.component::<RenderComponent>(entity),
                ctx.component::<TransformComponent>(entity),
            ) else {
                continue;
            };
            if !render.visible || !viewable_area.overlaps(&transform.bounds()) {
                continue;
            }

            self.draw_list.push(DrawRequest {
                texture: render.texture,
                position: transform.position + render.sprite_offset,
                size: transform.size(),
                rotation: transform.rotation,
                depth: render.depth,
            });
        }

        // Stable; equal depths keep entity order
        self.draw_list.sort_by_key(|request| request.depth);
    }

    fn submit(&mut self) -> crate::render::BackendResult<()> {
        self.backend.begin(&self.camera)?;
        for request in &self.draw_list {
            self.backend.draw(request)?;
        }
        self.backend.end()
    }
}

impl<B: RenderBackend> System for RenderingSystem<B> {
    fn name(&self) -> &'static str {
        "RenderingSystem"
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
        self.collect(ctx, entities);
        if let Err(error) = self.submit() {
            log::error!("Rendering error: {}", error);
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
            system: "RenderingSystem",
            reason: error.to_string(),
        })
    }
}
