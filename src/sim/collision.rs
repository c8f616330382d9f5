//! Axis-aligned bounding box collision
//!
//! Boxes are closed intervals: edge contact counts as a hit. Two boxes are
//! disjoint only when one's max edge lies strictly before the other's min
//! edge on some axis.

use glam::Vec2;

use super::state::Body;

/// Overlap test for two center/size boxes
#[inline]
pub fn aabb_overlap(center_a: Vec2, size_a: Vec2, center_b: Vec2, size_b: Vec2) -> bool {
    let (min_a, max_a) = (center_a - size_a / 2.0, center_a + size_a / 2.0);
    let (min_b, max_b) = (center_b - size_b / 2.0, center_b + size_b / 2.0);

    !(max_a.x < min_b.x || max_a.y < min_b.y || min_a.x > max_b.x || min_a.y > max_b.y)
}

/// Whether two distinct bodies touch. A body never collides with itself.
#[inline]
pub fn colliding(a: &Body, b: &Body) -> bool {
    a.id != b.id && aabb_overlap(a.center, a.size, b.center, b.size)
}

/// Whether `body` touches anything else in `bodies`
pub fn collides_with_any<'a>(body: &Body, mut bodies: impl Iterator<Item = &'a Body>) -> bool {
    bodies.any(|other| colliding(body, other))
}
