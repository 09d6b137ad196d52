//! # Debug Rendering System
//!
//! Draws outlines for entities carrying a [`DebugRenderComponent`], usually
//! to visualise hitboxes. Runs in the variable pass, after the collision
//! system has resolved this frame's world shapes. Culling and ordering match
//! the sprite renderer: entities outside the camera are skipped and the rest
//! are drawn in ascending depth.

use crate::ecs::components::{DebugRenderComponent, DebugShape, HitboxComponent, TransformComponent};
use crate::ecs::{ComponentType, Entity, System, SystemContext, SystemError};
use crate::foundation::math::{rotate, Vec2};
use crate::physics::WorldSpaceShape;
use crate::render::{BackendResult, Camera2D, DebugDrawBackend, DebugDrawRequest, DebugOutline};

/// Debug overlay for hitboxes and transform footprints
pub struct DebugRenderingSystem<B: DebugDrawBackend> {
    backend: B,
    camera: Camera2D,
    priority: i16,
    filter: [ComponentType; 2],
    requests: Vec<DebugDrawRequest>,
    released: bool,
}

impl<B: DebugDrawBackend> DebugRenderingSystem<B> {
    /// Default priority; draws on top of the scene
    pub const DEFAULT_PRIORITY: i16 = 127;

    /// Create a debug overlay drawing through `backend`
    pub fn new(backend: B, camera: Camera2D) -> Self {
        Self {
            backend,
            camera,
            priority: Self::DEFAULT_PRIORITY,
            filter: [
                ComponentType::of::<DebugRenderComponent>(),
                ComponentType::of::<TransformComponent>(),
            ],
            requests: Vec::new(),
            released: false,
        }
    }

    /// Camera used for culling
    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Mutable camera
    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    /// The backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Outlines submitted in the last frame, in draw order
    pub fn last_frame(&self) -> &[DebugDrawRequest] {
        &self.requests
    }

    fn collect(&mut self, ctx: &SystemContext<'_>, entities: &[Entity]) {
        let viewable_area = self.camera.viewable_area();
        self.requests.clear();

        for entity in entities {
            let (Some(debug), Some(transform)) = (
                ctx.component::<DebugRenderComponent>(entity),
                ctx.component::<TransformComponent>(entity),
            ) else {
                continue;
            };
            if !viewable_area.overlaps(&transform.bounds()) {
                continue;
            }

            let world_shape = ctx
                .component::<HitboxComponent>(entity)
                .and_then(|hitbox| hitbox.world_shape.as_ref());
            self.requests.push(DebugDrawRequest {
                outline: outline(debug.shape, transform, world_shape),
                color: debug.color,
                depth: debug.depth,
            });
        }

        self.requests.sort_by_key(|request| request.depth);
    }

    fn submit(&mut self) -> BackendResult<()> {
        self.backend.begin(&self.camera)?;
        for request in &self.requests {
            self.backend.outline(request)?;
        }
        self.backend.end()
    }
}

fn outline(shape: DebugShape, transform: &TransformComponent, world_shape: Option<&WorldSpaceShape>) -> DebugOutline {
    match (shape, world_shape) {
        (DebugShape::Hitbox, Some(WorldSpaceShape::Rectangle(rect))) => DebugOutline::Rect(*rect),
        (DebugShape::Hitbox, Some(WorldSpaceShape::Circle(circle))) => DebugOutline::Circle {
            center: circle.center,
            radius: circle.radius,
        },
        (DebugShape::Hitbox, Some(WorldSpaceShape::Polygon(polygon))) => {
            DebugOutline::Polygon(polygon.vertices().to_vec())
        }
        (DebugShape::Hitbox | DebugShape::Rect, _) => {
            if transform.rotation.abs() <= f32::EPSILON {
                DebugOutline::Rect(transform.bounds())
            } else {
                let half = transform.size() / 2.0;
                rotated_outline(transform, &[
                    Vec2::new(-half.x, -half.y),
                    Vec2::new(half.x, -half.y),
                    Vec2::new(half.x, half.y),
                    Vec2::new(-half.x, half.y),
                ])
            }
        }
        (DebugShape::Circle, _) => DebugOutline::Circle {
            center: transform.center(),
            radius: transform.width / 2.0,
        },
        (DebugShape::Triangle, _) => {
            let half = transform.size() / 2.0;
            rotated_outline(transform, &[
                Vec2::new(-half.x, -half.y),
                Vec2::new(0.0, half.y),
                Vec2::new(half.x, -half.y),
            ])
        }
    }
}

fn rotated_outline(transform: &TransformComponent, local: &[Vec2]) -> DebugOutline {
    let center = transform.center();
    DebugOutline::Polygon(
        local
            .iter()
            .map(|&point| center + rotate(point, transform.rotation))
            .collect(),
    )
}

impl<B: DebugDrawBackend> System for DebugRenderingSystem<B> {
    fn name(&self) -> &'static str {
        "DebugRenderingSystem"
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
            log::error!("Debug rendering error: {}", error);
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
            system: "DebugRenderingSystem",
            reason: error.to_string(),
        })
    }
}
