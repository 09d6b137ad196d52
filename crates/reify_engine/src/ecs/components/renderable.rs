//! Render component for entities that draw a sprite

use crate::ecs::Component;
use crate::foundation::math::Vec2;
use crate::render::TextureHandle;

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderComponent {
    /// Texture to draw
    pub texture: TextureHandle,

    /// Draw order; lower depths are drawn first
    pub depth: i32,

    /// Sprite offset from the transform position
    pub sprite_offset: Vec2,

    /// Whether this object is drawn at all
    pub visible: bool,
}

impl Component for RenderComponent {}

impl RenderComponent {
    /// Create a visible render component at depth 0
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            depth: 0,
            sprite_offset: Vec2::zeros(),
            visible: true,
        }
    }

    /// Set the draw depth (builder pattern)
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the sprite offset (builder pattern)
    pub fn with_sprite_offset(mut self, offset: Vec2) -> Self {
        self.sprite_offset = offset;
        self
    }
}
