//! # Render Backend Abstraction
//!
//! The simulation core never rasterizes anything itself. Rendering and
//! lighting systems compute *what* to draw and hand it to a backend through
//! the traits below; a concrete backend (a GPU renderer, a test recorder, a
//! logger) decides *how*.
//!
//! ## Frame protocol
//!
//! Each variable step the rendering system calls [`RenderBackend::begin`],
//! then [`RenderBackend::draw`] once per visible sprite in depth order, then
//! [`RenderBackend::end`]. [`RenderBackend::release`] is called once when the
//! owning scene is disposed. [`DebugDrawBackend`] follows the same protocol
//! with outlines instead of sprites.

use crate::foundation::math::{Rect, Vec2};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Errors reported by render and lighting backends
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Releasing backend resources failed
    #[error("Resource release failed: {0}")]
    ReleaseFailed(String),

    /// The backend was used after being released
    #[error("Backend already released")]
    Released,
}

/// Opaque handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Orthographic 2D camera
///
/// `position` is the centre of the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Centre of the view in world space
    pub position: Vec2,
    /// Visible width in world units
    pub viewport_width: f32,
    /// Visible height in world units
    pub viewport_height: f32,
}

impl Camera2D {
    /// Camera of the given viewport size centred on that viewport
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::new(viewport_width / 2.0, viewport_height / 2.0),
            viewport_width,
            viewport_height,
        }
    }

    /// World-space region the camera sees
    pub fn viewable_area(&self) -> Rect {
        Rect::from_center(self.position, self.viewport_width, self.viewport_height)
    }

    /// Change the viewport size, keeping the centre
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }
}

/// One sprite to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    /// Texture to draw
    pub texture: TextureHandle,
    /// Minimum corner in world space
    pub position: Vec2,
    /// Size in world units
    pub size: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Draw depth the request was sorted by
    pub depth: i32,
}

/// A light ready for the lighting backend
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLight {
    /// World-space position
    pub position: Vec2,
    /// RGBA colour
    pub color: [f32; 4],
    /// Reach in world units
    pub distance: f32,
}

/// Outline geometry for debug drawing, in world space
#[derive(Debug, Clone, PartialEq)]
pub enum DebugOutline {
    /// Axis-aligned rectangle
    Rect(Rect),
    /// Circle
    Circle {
        /// Centre position
        center: Vec2,
        /// Radius
        radius: f32,
    },
    /// Closed polygon; the last vertex connects back to the first
    Polygon(Vec<Vec2>),
}

/// One outline to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DebugDrawRequest {
    /// Geometry to outline
    pub outline: DebugOutline,
    /// RGBA line colour
    pub color: [f32; 4],
    /// Draw depth the request was sorted by
    pub depth: i32,
}

/// Sprite drawing backend
pub trait RenderBackend: 'static {
    /// Start a frame viewed through `camera`
    fn begin(&mut self, camera: &Camera2D) -> BackendResult<()>;

    /// Draw one sprite
    fn draw(&mut self, request: &DrawRequest) -> BackendResult<()>;

    /// Finish the frame
    fn end(&mut self) -> BackendResult<()>;

    /// Viewport size changed
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Release every resource held by the backend
    fn release(&mut self) -> BackendResult<()>;
}

/// Light rendering backend
pub trait LightingBackend: 'static {
    /// Render the given lights for one frame
    fn render(&mut self, camera: &Camera2D, lights: &[ActiveLight]) -> BackendResult<()>;

    /// Viewport size changed
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Release every resource held by the backend
    fn release(&mut self) -> BackendResult<()>;
}

/// Line drawing backend for debug overlays
pub trait DebugDrawBackend: 'static {
    /// Start a frame viewed through `camera`
    fn begin(&mut self, camera: &Camera2D) -> BackendResult<()>;

    /// Draw one outline
    fn outline(&mut self, request: &DebugDrawRequest) -> BackendResult<()>;

    /// Finish the frame
    fn end(&mut self) -> BackendResult<()>;

    /// Viewport size changed
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Release every resource held by the backend
    fn release(&mut self) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewable_area_is_centred() {
        let mut camera = Camera2D::new(800.0, 600.0);
        assert_eq!(camera.viewable_area(), Rect::new(0.0, 0.0, 800.0, 600.0));

        camera.position = Vec2::new(0.0, 0.0);
        camera.resize(100.0, 50.0);
        let area = camera.viewable_area();
        assert_relative_eq!(area.min(), Vec2::new(-50.0, -25.0));
        assert_relative_eq!(area.max(), Vec2::new(50.0, 25.0));
    }
}
