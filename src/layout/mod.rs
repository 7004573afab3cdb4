//! Force passes for the node system.
//!
//! One simulation step runs three passes in order, each committing its
//! position updates before the next one reads:
//!
//! 1. `spring` - bonds relax toward their rest length
//! 2. `centroid` - every node is pushed away from the common centroid
//! 3. `repulsion` - nearby node pairs push each other apart
//!
//! The passes operate on a [`PositionBuffer`](crate::graph::PositionBuffer)
//! and know nothing about node handles, colors or rendering.

pub mod centroid;
pub mod config;
pub mod repulsion;
pub mod spring;

pub use centroid::apply_centroid_repulsion;
pub use config::{BondIntegration, K_SPRING, SimulationConfig, StepStats};
pub use repulsion::{PairwiseStats, apply_pairwise_repulsion};
pub use spring::apply_bond_forces;
