//! NodeSystem - the layout engine.
//!
//! The NodeSystem owns every node and bond, keeps node positions in an SoA
//! [`PositionBuffer`] for zero-copy renderer access, and runs the force
//! passes of [`crate::layout`] over them. Nodes and bonds are append-only:
//! handles are insertion indices and stay valid for the engine's lifetime.

use std::cell::OnceCell;

use petgraph::graph::{NodeIndex, UnGraph};

use super::bond::{Bond, BondId};
use super::node::{Color, NodeId};
use super::positions::PositionBuffer;
use crate::error::{Error, Result};
use crate::geom::{Box2, Vec2, is_finite, point};
use crate::layout::{self, BondIntegration, K_SPRING, PairwiseStats, SimulationConfig, StepStats};
use crate::render::Renderer;
use crate::spatial::SpatialIndex;

/// The layout engine.
///
/// This struct manages:
/// - Node positions (SoA layout) and node colors
/// - Bonds in insertion order
/// - A renderer-only draw offset that physics never reads
/// - A spatial index for picking, rebuilt lazily after positions move
/// - A bond adjacency graph, built lazily on the first neighbor query
pub struct NodeSystem {
    positions: PositionBuffer,
    node_colors: Vec<Color>,
    bonds: Vec<Bond>,
    draw_offset: Vec2,
    spatial: OnceCell<SpatialIndex>,
    adjacency: OnceCell<UnGraph<NodeId, BondId>>,
}

impl NodeSystem {
    /// Create a new empty node system.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a node system with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, bond_capacity: usize) -> Self {
        Self {
            positions: PositionBuffer::with_capacity(node_capacity),
            node_colors: Vec::with_capacity(node_capacity),
            bonds: Vec::with_capacity(bond_capacity),
            draw_offset: Vec2::zero(),
            spatial: OnceCell::new(),
            adjacency: OnceCell::new(),
        }
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node at the specified position.
    pub fn add_node(&mut self, position: Vec2, color: Color) -> NodeId {
        let id = NodeId(self.positions.len() as u32);
        self.positions.push(position);
        self.node_colors.push(color);
        self.spatial.take();
        self.adjacency.take();

        tracing::debug!(node = %id, x = position.x, y = position.y, "added node");
        id
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Check whether `id` was issued by this node system.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.positions.len()
    }

    fn slot(&self, id: NodeId) -> Result<usize> {
        if self.contains(id) {
            Ok(id.index())
        } else {
            Err(Error::InvalidHandle(id))
        }
    }

    /// Get a node's position.
    pub fn position(&self, id: NodeId) -> Result<Vec2> {
        Ok(self.positions.get(self.slot(id)?))
    }

    /// Move a node explicitly (e.g. while the input layer drags it).
    pub fn set_position(&mut self, id: NodeId, position: Vec2) -> Result<()> {
        let slot = self.slot(id)?;
        self.positions.set(slot, position);
        self.spatial.take();
        Ok(())
    }

    pub fn node_color(&self, id: NodeId) -> Result<Color> {
        Ok(self.node_colors[self.slot(id)?])
    }

    pub fn set_node_color(&mut self, id: NodeId, color: Color) -> Result<()> {
        let slot = self.slot(id)?;
        self.node_colors[slot] = color;
        Ok(())
    }

    /// Iterate nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, Vec2, Color)> + '_ {
        self.positions
            .iter()
            .zip(&self.node_colors)
            .enumerate()
            .map(|(i, (position, &color))| (NodeId(i as u32), position, color))
    }

    /// Position buffer, for renderers that upload X/Y arrays directly.
    pub fn positions(&self) -> &PositionBuffer {
        &self.positions
    }

    pub fn node_colors(&self) -> &[Color] {
        &self.node_colors
    }

    // =========================================================================
    // Bond Operations
    // =========================================================================

    /// Add a bond whose rest length is the current distance between `a` and `b`.
    ///
    /// Fails with [`Error::NonFinitePosition`] when either endpoint has no
    /// finite position to measure from.
    pub fn add_bond(&mut self, a: NodeId, b: NodeId) -> Result<BondId> {
        let (from, to) = (self.position(a)?, self.position(b)?);
        if a != b {
            if !is_finite(from) {
                return Err(Error::NonFinitePosition(a));
            }
            if !is_finite(to) {
                return Err(Error::NonFinitePosition(b));
            }
        }
        self.add_bond_with(a, b, (from - to).length(), Color::default())
    }

    /// Add a bond with an explicit rest length and color.
    pub fn add_bond_with(
        &mut self,
        a: NodeId,
        b: NodeId,
        rest_length: f32,
        color: Color,
    ) -> Result<BondId> {
        self.slot(a)?;
        self.slot(b)?;
        if a == b {
            return Err(Error::SelfBond(a));
        }
        if !rest_length.is_finite() || rest_length < 0.0 {
            return Err(Error::InvalidRestLength(rest_length));
        }

        let id = BondId(self.bonds.len() as u32);
        self.bonds.push(Bond::new(a, b, rest_length, color));
        self.adjacency.take();

        tracing::debug!(bond = %id, from = %a, to = %b, rest_length, "added bond");
        Ok(id)
    }

    /// Get the number of bonds.
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(id.index())
    }

    /// Bonds in insertion order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Current positions of a bond's two endpoints.
    pub fn bond_endpoints(&self, id: BondId) -> Option<(Vec2, Vec2)> {
        let (a, b) = self.bond(id)?.endpoints();
        Some((self.positions.get(a.index()), self.positions.get(b.index())))
    }

    /// Nodes sharing a bond with `id`, sorted and without duplicates.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let slot = self.slot(id)?;
        let graph = self.adjacency();
        let mut neighbors: Vec<_> = graph
            .neighbors(NodeIndex::new(slot))
            .map(|n| graph[n])
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        Ok(neighbors)
    }

    fn adjacency(&self) -> &UnGraph<NodeId, BondId> {
        self.adjacency.get_or_init(|| {
            let mut graph = UnGraph::with_capacity(self.node_count(), self.bonds.len());
            for (id, _, _) in self.nodes() {
                graph.add_node(id);
            }
            for (i, bond) in self.bonds.iter().enumerate() {
                let (a, b) = bond.endpoints();
                graph.add_edge(
                    NodeIndex::new(a.index()),
                    NodeIndex::new(b.index()),
                    BondId(i as u32),
                );
            }
            graph
        })
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// First node, in insertion order, strictly within `radius` of `point`.
    pub fn nearest_node(&self, point: Vec2, radius: f32) -> Option<NodeId> {
        self.spatial().first_within(point, radius)
    }

    /// All nodes inside the rectangle spanned by `min` and `max`.
    pub fn nodes_in_rect(&self, min: Vec2, max: Vec2) -> Vec<NodeId> {
        self.spatial().in_rect(min, max)
    }

    fn spatial(&self) -> &SpatialIndex {
        self.spatial.get_or_init(|| {
            let index = SpatialIndex::from_positions(self.positions.iter());
            let skipped = self.node_count() - index.len();
            if skipped > 0 {
                tracing::debug!(skipped, "nodes with non-finite positions left out of picking");
            }
            index
        })
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Arithmetic mean of all node positions.
    pub fn centroid(&self) -> Result<Vec2> {
        self.positions.centroid().ok_or(Error::EmptyGraph)
    }

    /// Bounding box of all nodes, or `None` when there are none.
    pub fn bounds(&self) -> Option<Box2> {
        let mut positions = self.positions.iter();
        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Box2::new(point(min.x, min.y), point(max.x, max.y)))
    }

    /// Translation applied by the renderer; never read by physics.
    pub fn draw_offset(&self) -> Vec2 {
        self.draw_offset
    }

    pub fn set_draw_offset(&mut self, offset: Vec2) {
        self.draw_offset = offset;
    }

    /// Hand every bond, then every node, to `renderer`, shifted by the draw offset.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let offset = self.draw_offset;
        for bond in &self.bonds {
            let (a, b) = bond.endpoints();
            renderer.draw_bond(
                self.positions.get(a.index()) + offset,
                self.positions.get(b.index()) + offset,
                bond.color(),
            );
        }
        for (_, position, color) in self.nodes() {
            renderer.draw_node(position + offset, color);
        }
    }

    // =========================================================================
    // Force Passes
    // =========================================================================

    /// Spring pass with the default stiffness and sequential commits.
    ///
    /// Returns the number of bonds skipped because their endpoints coincide.
    pub fn apply_bond_forces(&mut self) -> usize {
        self.run_bond_forces(K_SPRING, BondIntegration::Sequential)
    }

    /// Spring pass with explicit stiffness and commit mode.
    pub fn apply_bond_forces_with(
        &mut self,
        stiffness: f32,
        integration: BondIntegration,
    ) -> Result<usize> {
        layout::config::check_finite("springStiffness", stiffness)?;
        Ok(self.run_bond_forces(stiffness, integration))
    }

    fn run_bond_forces(&mut self, stiffness: f32, integration: BondIntegration) -> usize {
        let degenerate =
            layout::apply_bond_forces(&mut self.positions, &self.bonds, stiffness, integration);
        self.spatial.take();
        if degenerate > 0 {
            tracing::debug!(degenerate, "bonds with coincident endpoints produced no force");
        }
        degenerate
    }

    /// Push every node away from the centroid.
    ///
    /// Returns `Ok(false)` without moving anything when there are no nodes.
    pub fn apply_centroid_repulsion(&mut self, strength: f32) -> Result<bool> {
        layout::config::check_finite("centroidStrength", strength)?;
        let applied = layout::apply_centroid_repulsion(&mut self.positions, strength);
        if applied {
            self.spatial.take();
        } else {
            tracing::trace!("centroid pass skipped on empty node system");
        }
        Ok(applied)
    }

    /// Push apart every pair of nodes closer than `max_range`.
    pub fn apply_pairwise_repulsion(
        &mut self,
        max_range: f32,
        strength: f32,
    ) -> Result<PairwiseStats> {
        layout::config::check_range(max_range)?;
        layout::config::check_finite("repulsionStrength", strength)?;
        let stats = layout::apply_pairwise_repulsion(&mut self.positions, max_range, strength);
        self.spatial.take();
        if stats.coincident > 0 {
            tracing::debug!(
                coincident = stats.coincident,
                "coincident node pairs pushed along fallback directions"
            );
        }
        Ok(stats)
    }

    /// Run one simulation step: springs, then centroid field, then pairwise
    /// repulsion.
    pub fn step(&mut self, config: &SimulationConfig) -> Result<StepStats> {
        config.validate()?;

        let degenerate_bonds =
            self.run_bond_forces(config.spring_stiffness, config.bond_integration);
        let centroid_applied = self.apply_centroid_repulsion(config.centroid_strength)?;
        let pairwise =
            self.apply_pairwise_repulsion(config.repulsion_range, config.repulsion_strength)?;

        let stats = StepStats {
            degenerate_bonds,
            centroid_skipped: !centroid_applied,
            interacting_pairs: pairwise.interacting,
            coincident_pairs: pairwise.coincident,
        };
        tracing::trace!(?stats, nodes = self.node_count(), "simulation step");
        Ok(stats)
    }
}

impl Default for NodeSystem {
    fn default() -> Self {
        Self::new()
    }
}
