//! Geometry aliases shared by the engine and the force passes.

pub type Vec2 = euclid::default::Vector2D<f32>;
pub type Point = euclid::default::Point2D<f32>;
pub type Box2 = euclid::default::Box2D<f32>;

/// Below this separation two nodes are treated as coincident and no force law
/// that needs a direction is evaluated for them.
pub const DEGENERATE_EPSILON: f32 = 1.0e-4;

pub fn vec2(x: f32, y: f32) -> Vec2 {
    euclid::vec2(x, y)
}

pub fn point(x: f32, y: f32) -> Point {
    euclid::point2(x, y)
}

/// Check that both components are finite.
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
