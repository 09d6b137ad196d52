//! Primitive 2D shapes and intersection algorithms
//!
//! Provides circles and convex polygons together with the overlap tests the
//! collision detector needs. All tests are strict: shapes that only touch
//! along an edge or at a point do not overlap.

use crate::foundation::math::{rotate, Rect, Vec2};

/// A circle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Centre position
    pub center: Vec2,
    /// Radius
    pub radius: f32,
}

impl Circle {
    /// Creates a circle with the given centre and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this circle overlaps another
    pub fn overlaps(&self, other: &Circle) -> bool {
        let radius_sum = self.radius + other.radius;
        (self.center - other.center).magnitude_squared() < radius_sum * radius_sum
    }

    /// Check if this circle overlaps an axis-aligned rectangle
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = rect.clamp_point(self.center);
        (closest - self.center).magnitude_squared() < self.radius * self.radius
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.radius * 2.0, self.radius * 2.0)
    }
}

/// A convex polygon given by its vertices in winding order
///
/// Polygons with fewer than three vertices are degenerate and never overlap
/// anything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Creates a polygon from its vertices
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Polygon covering an axis-aligned rectangle
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.corners().to_vec())
    }

    /// Vertex list
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Whether the polygon has too few vertices to enclose an area
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Copy of this polygon rotated by `rotation` radians about the local
    /// origin and then moved to `origin`
    pub fn transformed(&self, origin: Vec2, rotation: f32) -> Self {
        Self::new(
            self.vertices
                .iter()
                .map(|&vertex| origin + rotate(vertex, rotation))
                .collect(),
        )
    }

    /// Axis-aligned bounds, `None` for an empty polygon
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.vertices.first()?;
        let (min, max) = self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                Vec2::new(min.x.min(v.x), min.y.min(v.y)),
                Vec2::new(max.x.max(v.x), max.y.max(v.y)),
            )
        });
        Some(Rect::from_min_max(min, max))
    }

    /// Separating axis test against another convex polygon
    pub fn overlaps(&self, other: &ConvexPolygon) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        !has_separating_axis(&self.vertices, &other.vertices)
            && !has_separating_axis(&other.vertices, &self.vertices)
    }

    /// Separating axis test against an axis-aligned rectangle
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        self.overlaps(&ConvexPolygon::from_rect(rect))
    }

    /// Edge/circle intersection, falling back to a centre containment test
    /// for circles entirely inside the polygon
    pub fn overlaps_circle(&self, circle: &Circle) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let radius_squared = circle.radius * circle.radius;
        self.edges()
            .any(|(start, end)| segment_intersects_circle(start, end, circle.center, radius_squared))
            || self.contains_point(circle.center)
    }

    /// Crossing-number point containment test
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let crossing_x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < crossing_x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let count = self.vertices.len();
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % count]))
    }
}

/// Whether any edge normal of `a` separates the two vertex sets
fn has_separating_axis(a: &[Vec2], b: &[Vec2]) -> bool {
    let count = a.len();
    for i in 0..count {
        let edge = a[(i + 1) % count] - a[i];
        let axis = Vec2::new(-edge.y, edge.x);
        if axis.magnitude_squared() == 0.0 {
            continue;
        }

        let (min_a, max_a) = project(a, &axis);
        let (min_b, max_b) = project(b, &axis);
        if max_a <= min_b || max_b <= min_a {
            return true;
        }
    }
    false
}

fn project(vertices: &[Vec2], axis: &Vec2) -> (f32, f32) {
    vertices.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), vertex| {
        let projection = vertex.dot(axis);
        (min.min(projection), max.max(projection))
    })
}

/// Whether the segment `start`–`end` passes strictly within `sqrt(radius_squared)` of `center`
pub fn segment_intersects_circle(start: Vec2, end: Vec2, center: Vec2, radius_squared: f32) -> bool {
    let segment = end - start;
    let length_squared = segment.magnitude_squared();
    let t = if length_squared == 0.0 {
        0.0
    } else {
        ((center - start).dot(&segment) / length_squared).clamp(0.0, 1.0)
    };
    let closest = start + segment * t;
    (closest - center).magnitude_squared() < radius_squared
}
