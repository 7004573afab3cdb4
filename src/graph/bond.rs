//! Bond type and related structures.
//!
//! Bonds are the springs between nodes. Each bond has:
//! - A stable unique identifier (its insertion index)
//! - Two endpoint node IDs (non-owning)
//! - A rest length at which the spring exerts no force
//! - A display color

use std::fmt;

use super::node::{Color, NodeId};

/// Stable bond identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BondId(pub u32);

impl BondId {
    /// Create a new BondId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BondId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bond({})", self.0)
    }
}

impl From<u32> for BondId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<BondId> for u32 {
    #[inline]
    fn from(id: BondId) -> Self {
        id.0
    }
}

/// A spring between two nodes.
///
/// Endpoints are validated by the engine before a bond is created, and the
/// rest length is fixed for the bond's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    a: NodeId,
    b: NodeId,
    rest_length: f32,
    color: Color,
}

impl Bond {
    pub(crate) fn new(a: NodeId, b: NodeId, rest_length: f32, color: Color) -> Self {
        Self {
            a,
            b,
            rest_length,
            color,
        }
    }

    /// The `(a, b)` endpoints. Spring force pulls `a` by `-f` and `b` by `+f`.
    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_id() {
        let id = BondId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "Bond(42)");
    }

    #[test]
    fn test_bond_accessors() {
        let bond = Bond::new(NodeId(0), NodeId(3), 5.0, Color::GRAY);
        assert_eq!(bond.endpoints(), (NodeId(0), NodeId(3)));
        assert_eq!(bond.rest_length(), 5.0);
        assert_eq!(bond.color(), Color::GRAY);
    }
}
