//! Debug overlay component

use crate::ecs::Component;

/// What the debug overlay outlines for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugShape {
    /// The resolved hitbox; falls back to the transform rectangle when the
    /// entity has no hitbox or it has not been resolved yet
    #[default]
    Hitbox,
    /// The transform rectangle, rotated about its centre
    Rect,
    /// Circle inscribed in the transform width
    Circle,
    /// Isosceles triangle inscribed in the transform, pointing up before rotation
    Triangle,
}

/// Marks an entity for the debug overlay
#[derive(Debug, Clone, PartialEq)]
pub struct DebugRenderComponent {
    /// RGBA line colour
    pub color: [f32; 4],
    /// Outline source
    pub shape: DebugShape,
    /// Draw order; lower depths are drawn first
    pub depth: i32,
}

impl Component for DebugRenderComponent {}

impl DebugRenderComponent {
    /// Coral colour used when none is given
    pub const DEFAULT_COLOR: [f32; 4] = [1.0, 0.5, 0.31, 1.0];

    /// Outline `shape` in the default colour
    pub fn new(shape: DebugShape) -> Self {
        Self {
            color: Self::DEFAULT_COLOR,
            shape,
            depth: 0,
        }
    }

    /// Set the colour (builder pattern)
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Set the draw depth (builder pattern)
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for DebugRenderComponent {
    fn default() -> Self {
        Self::new(DebugShape::default())
    }
}
