//! Error types for node system construction and force passes.

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("node system has no nodes")]
    EmptyGraph,
    #[error("{0} is not owned by this node system")]
    InvalidHandle(NodeId),
    #[error("cannot bond {0} to itself")]
    SelfBond(NodeId),
    #[error("{0} has a non-finite position")]
    NonFinitePosition(NodeId),
    #[error("rest length must be finite and non-negative, got {0}")]
    InvalidRestLength(f32),
    #[error("invalid simulation parameter: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
