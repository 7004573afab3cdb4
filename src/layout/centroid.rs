//! Centroid field pass.
//!
//! Every node is pushed directly away from the centroid of all nodes by
//! `strength * sqrt(|p - center|)`. The push grows without bound (but
//! sub-linearly) with distance; it keeps the layout from collapsing and
//! never attracts.

use crate::geom::{DEGENERATE_EPSILON, Vec2};
use crate::graph::PositionBuffer;

/// Outward displacement for a node at `position` relative to `center`.
///
/// A node sitting on the centroid has no direction and is not moved.
#[inline]
pub fn centroid_push(position: Vec2, center: Vec2, strength: f32) -> Vec2 {
    let offset = position - center;
    let distance = offset.length();
    if distance < DEGENERATE_EPSILON {
        return Vec2::zero();
    }
    let magnitude = distance.sqrt();
    (offset / distance) * (strength * magnitude)
}

/// Run the centroid pass. Returns `false` (and does nothing) for an empty buffer.
pub fn apply_centroid_repulsion(positions: &mut PositionBuffer, strength: f32) -> bool {
    let Some(center) = positions.centroid() else {
        return false;
    };
    for index in 0..positions.len() {
        let push = centroid_push(positions.get(index), center, strength);
        positions.translate(index, push);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::vec2;

    #[test]
    fn test_push_is_sqrt_of_distance() {
        let push = centroid_push(vec2(16.0, 0.0), vec2(0.0, 0.0), 0.5);
        assert!((push.x - 2.0).abs() < 1e-6);
        assert_eq!(push.y, 0.0);

        let push = centroid_push(vec2(0.0, -100.0), vec2(0.0, 0.0), 1.0);
        assert!((push.y - -10.0).abs() < 1e-5);
    }

    #[test]
    fn test_node_on_center_stays_put() {
        assert_eq!(centroid_push(vec2(3.0, 3.0), vec2(3.0, 3.0), 1.0), Vec2::zero());
    }

    #[test]
    fn test_pass_pushes_outward() {
        let mut positions = PositionBuffer::new();
        positions.push(vec2(-4.0, 0.0));
        positions.push(vec2(4.0, 0.0));
        positions.push(vec2(0.0, 0.0));

        assert!(apply_centroid_repulsion(&mut positions, 1.0));

        assert!((positions.get(0).x - -6.0).abs() < 1e-5);
        assert!((positions.get(1).x - 6.0).abs() < 1e-5);
        assert_eq!(positions.get(2), vec2(0.0, 0.0));
    }

    #[test]
    fn test_empty_buffer_is_skipped() {
        let mut positions = PositionBuffer::new();
        assert!(!apply_centroid_repulsion(&mut positions, 1.0));
        assert!(positions.is_empty());
    }

    #[test]
    fn test_single_node_never_moves() {
        let mut positions = PositionBuffer::new();
        positions.push(vec2(12.5, -3.0));
        apply_centroid_repulsion(&mut positions, 10.0);
        assert_eq!(positions.get(0), vec2(12.5, -3.0));
    }
}
