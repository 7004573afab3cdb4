//! Demo scene: a long spiral chain strung between two anchor nodes.
//!
//! Chain node `i` starts at `(sin(0.1 i), cos(0.1 i)) * 5 i`, so the chain
//! begins coiled around the origin with neighbors far apart on the outer
//! turns. Every link has rest length 5, which makes the whole chain contract
//! hard on the first frames before repulsion spreads it out.

use crate::error::Result;
use crate::geom::vec2;
use crate::graph::{Color, NodeId, NodeSystem};

/// Number of chain nodes in the demo scene.
pub const DEMO_CHAIN_LENGTH: usize = 100;

/// Rest length of every chain link.
pub const CHAIN_LINK_LENGTH: f32 = 5.0;

/// Handles of the nodes created by [`spiral_chain`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralChain {
    pub head: NodeId,
    pub tail: NodeId,
    pub links: Vec<NodeId>,
}

/// Add two anchors and a spiral chain of `length` nodes running from `head`
/// through the links and back to `tail`.
pub fn spiral_chain(system: &mut NodeSystem, length: usize) -> Result<SpiralChain> {
    let head = system.add_node(vec2(50.0, 50.0), Color::RED);
    let tail = system.add_node(vec2(150.0, 50.0), Color::BLUE);

    let mut links = Vec::with_capacity(length);
    let mut last = head;
    for i in 0..length {
        let turn = i as f32 * 0.1;
        let radius = i as f32 * 5.0;
        let node = system.add_node(vec2(turn.sin() * radius, turn.cos() * radius), Color::YELLOW);
        system.add_bond_with(last, node, CHAIN_LINK_LENGTH, Color::GRAY)?;
        links.push(node);
        last = node;
    }
    system.add_bond_with(last, tail, CHAIN_LINK_LENGTH, Color::WHITE)?;

    Ok(SpiralChain { head, tail, links })
}

impl NodeSystem {
    /// A node system preloaded with the demo spiral chain.
    pub fn demo() -> Result<Self> {
        let mut system = NodeSystem::with_capacity(DEMO_CHAIN_LENGTH + 2, DEMO_CHAIN_LENGTH + 1);
        spiral_chain(&mut system, DEMO_CHAIN_LENGTH)?;
        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spiral_chain_shape() {
        let mut system = NodeSystem::new();
        let chain = spiral_chain(&mut system, 10).unwrap();

        assert_eq!(system.node_count(), 12);
        assert_eq!(system.bond_count(), 11);
        assert_eq!(chain.links.len(), 10);
        assert_eq!(system.position(chain.links[0]), Ok(vec2(0.0, 0.0)));
        assert_eq!(system.node_color(chain.head), Ok(Color::RED));

        let first = system.bonds()[0];
        assert_eq!(first.endpoints(), (chain.head, chain.links[0]));
        let last = system.bonds()[10];
        assert_eq!(last.endpoints(), (chain.links[9], chain.tail));
        assert_eq!(last.color(), Color::WHITE);
        assert!(system.bonds().iter().all(|b| b.rest_length() == CHAIN_LINK_LENGTH));
    }

    #[test]
    fn test_spiral_chain_without_links_bonds_anchors() {
        let mut system = NodeSystem::new();
        let chain = spiral_chain(&mut system, 0).unwrap();

        assert!(chain.links.is_empty());
        assert_eq!(system.bonds()[0].endpoints(), (chain.head, chain.tail));
    }

    #[test]
    fn test_demo() {
        let system = NodeSystem::demo().unwrap();
        assert_eq!(system.node_count(), DEMO_CHAIN_LENGTH + 2);
        assert_eq!(system.bond_count(), DEMO_CHAIN_LENGTH + 1);
    }
}
