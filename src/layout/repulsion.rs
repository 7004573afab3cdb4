//! All-pairs short-range repulsion.
//!
//! For every unordered pair closer than `max_range` the pair is pushed apart
//! with a strength that falls off linearly from `strength` at contact to zero
//! at `max_range`. Forces are accumulated for all pairs first and applied in a
//! single sweep, so the result does not depend on node order and the forces
//! of one pass sum to zero.

use std::f32::consts::TAU;

use crate::geom::{DEGENERATE_EPSILON, Vec2, vec2};
use crate::graph::PositionBuffer;

/// Counters reported by one repulsion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairwiseStats {
    /// Pairs strictly inside the cutoff.
    pub interacting: usize,
    /// Of those, pairs pushed along the fallback direction.
    pub coincident: usize,
}

/// Deterministic unit direction for a coincident pair `(i, j)`.
///
/// Golden-ratio angles spread coincident pairs around the circle instead of
/// stacking them on one axis.
#[inline]
pub fn fallback_direction(i: usize, j: usize) -> Vec2 {
    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214 + 0.37) * TAU;
    vec2(angle.cos(), angle.sin())
}

/// Linear falloff: `strength` at zero distance, exactly zero at `max_range`.
#[inline]
pub fn falloff(strength: f32, distance: f32, max_range: f32) -> f32 {
    strength * (1.0 - distance / max_range)
}

/// Compute per-node repulsion forces without touching positions.
pub fn accumulate_repulsion(
    positions: &[Vec2],
    max_range: f32,
    strength: f32,
    forces: &mut Vec<Vec2>,
) -> PairwiseStats {
    forces.clear();
    forces.resize(positions.len(), Vec2::zero());

    let max_range_sq = max_range * max_range;
    let mut stats = PairwiseStats::default();

    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let offset = positions[i] - positions[j];
            let distance_sq = offset.square_length();
            if distance_sq >= max_range_sq {
                continue;
            }
            stats.interacting += 1;

            let distance = distance_sq.sqrt();
            let direction = if distance >= DEGENERATE_EPSILON {
                offset / distance
            } else {
                stats.coincident += 1;
                fallback_direction(i, j)
            };

            let force = direction * falloff(strength, distance, max_range);
            forces[i] += force;
            forces[j] -= force;
        }
    }

    stats
}

/// Run the repulsion pass over every node.
pub fn apply_pairwise_repulsion(
    positions: &mut PositionBuffer,
    max_range: f32,
    strength: f32,
) -> PairwiseStats {
    let snapshot = positions.snapshot();
    let mut forces = Vec::with_capacity(snapshot.len());
    let stats = accumulate_repulsion(&snapshot, max_range, strength, &mut forces);
    positions.apply(&forces);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(points: &[Vec2]) -> PositionBuffer {
        let mut positions = PositionBuffer::new();
        for p in points {
            positions.push(*p);
        }
        positions
    }

    #[test]
    fn test_close_pair_is_pushed_apart() {
        let mut positions = buffer(&[vec2(0.0, 0.0), vec2(75.0, 0.0)]);
        let stats = apply_pairwise_repulsion(&mut positions, 150.0, 1.0);

        assert_eq!(stats.interacting, 1);
        assert_eq!(stats.coincident, 0);
        assert!((positions.get(0).x - -0.5).abs() < 1e-6);
        assert!((positions.get(1).x - 75.5).abs() < 1e-5);
    }

    #[test]
    fn test_pair_at_range_receives_no_force() {
        let mut positions = buffer(&[vec2(0.0, 0.0), vec2(150.0, 0.0)]);
        let stats = apply_pairwise_repulsion(&mut positions, 150.0, 1.0);

        assert_eq!(stats.interacting, 0);
        assert_eq!(positions.get(0), vec2(0.0, 0.0));
        assert_eq!(positions.get(1), vec2(150.0, 0.0));
    }

    #[test]
    fn test_force_vanishes_approaching_range() {
        let mut previous = f32::INFINITY;
        for gap in [1.0, 0.1, 0.01] {
            let mut forces = Vec::new();
            accumulate_repulsion(
                &[vec2(0.0, 0.0), vec2(150.0 - gap, 0.0)],
                150.0,
                1.0,
                &mut forces,
            );
            let magnitude = forces[0].length();
            assert!(magnitude > 0.0 && magnitude < previous);
            assert!(magnitude <= gap / 150.0 + 1e-5);
            previous = magnitude;
        }
    }

    #[test]
    fn test_coincident_pair_uses_fallback_direction() {
        let mut positions = buffer(&[vec2(10.0, 10.0), vec2(10.0, 10.0)]);
        let stats = apply_pairwise_repulsion(&mut positions, 150.0, 1.0);

        assert_eq!(stats.coincident, 1);
        let a = positions.get(0);
        let b = positions.get(1);
        assert!(a.x.is_finite() && a.y.is_finite());
        assert!(b.x.is_finite() && b.y.is_finite());

        let expected = vec2(10.0, 10.0) + fallback_direction(0, 1);
        assert!((a - expected).length() < 1e-5);
        assert!(((a - b).length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_fallback_direction_is_unit_and_deterministic() {
        for (i, j) in [(0, 1), (3, 7), (10, 11)] {
            let direction = fallback_direction(i, j);
            assert!((direction.length() - 1.0).abs() < 1e-5);
            assert_eq!(direction, fallback_direction(i, j));
        }
        assert_ne!(fallback_direction(0, 1), fallback_direction(0, 2));
    }

    #[test]
    fn test_forces_sum_to_zero() {
        let points = [
            vec2(0.0, 0.0),
            vec2(10.0, 3.0),
            vec2(-20.0, 40.0),
            vec2(5.0, -5.0),
            vec2(5.0, -5.0),
            vec2(400.0, 400.0),
        ];
        let mut forces = Vec::new();
        accumulate_repulsion(&points, 150.0, 2.0, &mut forces);

        let total = forces.iter().fold(Vec2::zero(), |acc, f| acc + *f);
        assert!(total.length() < 1e-4, "total = {total:?}");
        assert_eq!(forces[5], Vec2::zero());
    }
}
