//! Spatial indexing for node picking.
//!
//! This module provides an R-tree based spatial index for radius and
//! rectangle queries on node positions.

mod rtree;

pub use rtree::SpatialIndex;
