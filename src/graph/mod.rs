//! Graph data structures and operations.
//!
//! Nodes and bonds live in an append-only arena owned by [`NodeSystem`].
//! Handles are stable integer indices, and positions are kept in a Structure
//! of Arrays buffer so force passes and renderers read contiguous memory.

mod bond;
mod engine;
mod node;
mod positions;

pub use bond::{Bond, BondId};
pub use engine::NodeSystem;
pub use node::{Color, NodeId};
pub use positions::PositionBuffer;
