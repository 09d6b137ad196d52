//! High-level collision shape abstractions
//!
//! Provides ECS-friendly collision shapes that store data in local space
//! and resolve to world space once per fixed step for overlap testing.

use super::primitives::{Circle, ConvexPolygon};
use crate::foundation::math::{Rect, Vec2};

/// Collision shape types (stored in LOCAL SPACE)
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned rectangle centred on the hitbox anchor
    Rectangle {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
    },
    /// Circle centred on the hitbox anchor
    Circle {
        /// Radius
        radius: f32,
    },
    /// Convex polygon with vertices relative to the hitbox anchor
    Polygon(ConvexPolygon),
}

impl CollisionShape {
    /// Creates a rectangular shape
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::Rectangle { width, height }
    }

    /// Creates a circular shape
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Creates a polygon shape from local vertices
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Self::Polygon(ConvexPolygon::new(vertices))
    }

    /// Resolve to world space around `anchor`
    ///
    /// Rectangles and circles are centred on the anchor. Polygon vertices are
    /// rotated by `rotation` radians and translated so their local origin sits
    /// on the anchor.
    pub fn to_world_space(&self, anchor: Vec2, rotation: f32) -> WorldSpaceShape {
        match self {
            Self::Rectangle { width, height } => {
                WorldSpaceShape::Rectangle(Rect::from_center(anchor, *width, *height))
            }
            Self::Circle { radius } => WorldSpaceShape::Circle(Circle::new(anchor, *radius)),
            Self::Polygon(polygon) => WorldSpaceShape::Polygon(polygon.transformed(anchor, rotation)),
        }
    }
}

/// World-space collision shape
#[derive(Debug, Clone, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space rectangle
    Rectangle(Rect),
    /// World-space circle
    Circle(Circle),
    /// World-space polygon
    Polygon(ConvexPolygon),
}

impl WorldSpaceShape {
    /// Axis-aligned bounds; `None` for an empty polygon
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rectangle(rect) => Some(*rect),
            Self::Circle(circle) => Some(circle.bounds()),
            Self::Polygon(polygon) => polygon.bounds(),
        }
    }

    /// Whether the shape can take part in collision tests at all
    pub fn is_testable(&self) -> bool {
        match self {
            Self::Polygon(polygon) => !polygon.is_degenerate(),
            Self::Rectangle(rect) => rect.width > 0.0 && rect.height > 0.0,
            Self::Circle(circle) => circle.radius > 0.0,
        }
    }

    /// Strict overlap test against an axis-aligned region (a grid cell)
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        match self {
            Self::Rectangle(own) => own.overlaps(rect),
            Self::Circle(circle) => ConvexPolygon::from_rect(rect).overlaps_circle(circle),
            Self::Polygon(polygon) => polygon.overlaps_rect(rect),
        }
    }

    /// Strict overlap test against another world-space shape
    pub fn overlaps(&self, other: &WorldSpaceShape) -> bool {
        match (self, other) {
            (Self::Rectangle(a), Self::Rectangle(b)) => a.overlaps(b),
            (Self::Rectangle(rect), Self::Polygon(polygon))
            | (Self::Polygon(polygon), Self::Rectangle(rect)) => polygon.overlaps_rect(rect),
            (Self::Rectangle(rect), Self::Circle(circle))
            | (Self::Circle(circle), Self::Rectangle(rect)) => circle.overlaps_rect(rect),
            (Self::Polygon(a), Self::Polygon(b)) => a.overlaps(b),
            (Self::Polygon(polygon), Self::Circle(circle))
            | (Self::Circle(circle), Self::Polygon(polygon)) => polygon.overlaps_circle(circle),
            (Self::Circle(a), Self::Circle(b)) => a.overlaps(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_centred_on_anchor() {
        let shape = CollisionShape::rectangle(4.0, 2.0).to_world_space(Vec2::new(10.0, 10.0), 1.0);
        let WorldSpaceShape::Rectangle(rect) = shape else {
            panic!("expected rectangle");
        };
        assert_relative_eq!(rect.min(), Vec2::new(8.0, 9.0));
        assert_relative_eq!(rect.max(), Vec2::new(12.0, 11.0));
    }

    #[test]
    fn test_full_overlap_matrix() {
        let anchor = Vec2::new(0.0, 0.0);
        let rect = CollisionShape::rectangle(2.0, 2.0).to_world_space(anchor, 0.0);
        let circle = CollisionShape::circle(1.0).to_world_space(Vec2::new(1.5, 0.0), 0.0);
        let triangle = CollisionShape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
        ])
        .to_world_space(Vec2::new(0.5, 0.5), 0.0);

        let shapes = [&rect, &circle, &triangle];
        for a in shapes {
            for b in shapes {
                assert!(a.overlaps(b), "{a:?} should overlap {b:?}");
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }

        let far = CollisionShape::circle(1.0).to_world_space(Vec2::new(50.0, 50.0), 0.0);
        for shape in shapes {
            assert!(!shape.overlaps(&far));
            assert!(!far.overlaps(shape));
        }
    }

    #[test]
    fn test_cell_test_per_shape() {
        let cell = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inside = CollisionShape::circle(2.0).to_world_space(Vec2::new(5.0, 5.0), 0.0);
        let outside = CollisionShape::circle(2.0).to_world_space(Vec2::new(15.0, 5.0), 0.0);
        let edge_touching = CollisionShape::rectangle(4.0, 4.0).to_world_space(Vec2::new(12.0, 5.0), 0.0);

        assert!(inside.overlaps_rect(&cell));
        assert!(!outside.overlaps_rect(&cell));
        assert!(!edge_touching.overlaps_rect(&cell));
    }

    #[test]
    fn test_degenerate_polygon_is_not_testable() {
        let line = CollisionShape::polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)])
            .to_world_space(Vec2::new(0.0, 0.0), 0.0);
        assert!(!line.is_testable());
    }
}
