//! Spring relaxation pass.
//!
//! Each bond pulls or pushes its endpoints toward its rest length with a force
//! proportional to the stretch: `f = (d - rest) * k * offset / d`, where
//! `offset = a - b`. Endpoint `a` moves by `-f` and `b` by `+f`, so the pair's
//! center of mass never moves.

use super::config::BondIntegration;
use crate::geom::{DEGENERATE_EPSILON, Vec2};
use crate::graph::{Bond, PositionBuffer};

/// Spring force on endpoint `b` (endpoint `a` receives the negation).
///
/// Returns `None` when the endpoints coincide and no direction exists.
#[inline]
pub fn spring_force(a: Vec2, b: Vec2, rest_length: f32, stiffness: f32) -> Option<Vec2> {
    let offset = a - b;
    let distance = offset.length();
    if distance < DEGENERATE_EPSILON {
        return None;
    }
    let delta = distance - rest_length;
    Some(offset * (delta * stiffness) / distance)
}

/// Run the spring pass over `bonds`, returning the number of degenerate bonds.
pub fn apply_bond_forces(
    positions: &mut PositionBuffer,
    bonds: &[Bond],
    stiffness: f32,
    integration: BondIntegration,
) -> usize {
    match integration {
        BondIntegration::Sequential => apply_sequential(positions, bonds, stiffness),
        BondIntegration::Simultaneous => apply_simultaneous(positions, bonds, stiffness),
    }
}

fn apply_sequential(positions: &mut PositionBuffer, bonds: &[Bond], stiffness: f32) -> usize {
    let mut degenerate = 0;
    for bond in bonds {
        let (a, b) = bond.endpoints();
        let (a, b) = (a.index(), b.index());
        let Some(force) = spring_force(
            positions.get(a),
            positions.get(b),
            bond.rest_length(),
            stiffness,
        ) else {
            degenerate += 1;
            continue;
        };
        positions.translate(a, -force);
        positions.translate(b, force);
    }
    degenerate
}

fn apply_simultaneous(positions: &mut PositionBuffer, bonds: &[Bond], stiffness: f32) -> usize {
    let snapshot = positions.snapshot();
    let mut forces = vec![Vec2::zero(); snapshot.len()];
    let mut degenerate = 0;
    for bond in bonds {
        let (a, b) = bond.endpoints();
        let (a, b) = (a.index(), b.index());
        let Some(force) = spring_force(snapshot[a], snapshot[b], bond.rest_length(), stiffness)
        else {
            degenerate += 1;
            continue;
        };
        forces[a] -= force;
        forces[b] += force;
    }
    positions.apply(&forces);
    degenerate
}
