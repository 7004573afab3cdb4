//! R-tree based spatial index using the rstar crate.
//!
//! Backs the node picking queries of the input layer:
//! - First node (in insertion order) within a radius
//! - Rectangle intersection

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::geom::{Vec2, is_finite};
use crate::graph::NodeId;

/// A point in the spatial index with associated node ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// The node identifier.
    pub id: NodeId,
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(id: NodeId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        (self.x - point[0]).abs() < f32::EPSILON && (self.y - point[1]).abs() < f32::EPSILON
    }
}

/// Spatial index over a frozen set of node positions.
///
/// Positions move every frame, so the index is bulk-loaded on demand rather
/// than updated incrementally.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Bulk-load positions; node `i` gets `NodeId(i)`.
    ///
    /// Nodes with a non-finite coordinate are left out: they lie within no
    /// radius and no rectangle, and rstar cannot order them.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec2>) -> Self {
        let points: Vec<_> = positions
            .into_iter()
            .enumerate()
            .filter(|&(_, p)| is_finite(p))
            .map(|(i, p)| NodePoint::new(NodeId(i as u32), p.x, p.y))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Lowest node ID strictly within `radius` of `point`.
    ///
    /// This is the first hit in insertion order, not the closest one.
    pub fn first_within(&self, point: Vec2, radius: f32) -> Option<NodeId> {
        let query = [point.x, point.y];
        let radius_sq = radius * radius;
        self.tree
            .locate_within_distance(query, radius_sq)
            .filter(|candidate| candidate.distance_2(&query) < radius_sq)
            .map(|candidate| candidate.id)
            .min()
    }

    /// All nodes inside the rectangle (inclusive), sorted by ID.
    pub fn in_rect(&self, min: Vec2, max: Vec2) -> Vec<NodeId> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        let mut ids: Vec<_> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|point| point.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.tree.size()
    }
}
