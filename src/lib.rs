//! Graph Repulsion - WASM Module
//!
//! This module provides the simulation core of the Graph Repulsion layout
//! toy: nodes joined by springy bonds that relax toward their rest length,
//! push away from their common centroid and repel their close neighbors.
//! It is compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen; rendering and input handling live on the JavaScript side.
//!
//! # Architecture
//!
//! - `graph`: Append-only node/bond arena with SoA position buffers
//! - `layout`: The spring, centroid and pairwise repulsion passes
//! - `spatial`: R-tree spatial index for node picking
//! - `render`: Renderer capability the host injects for drawing
//! - `scene`: Demo spiral-chain graph

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod geom;
pub mod graph;
pub mod layout;
pub mod render;
pub mod scene;
pub mod spatial;

pub use error::Error;
pub use graph::{Bond, BondId, Color, NodeId, NodeSystem};
pub use layout::{BondIntegration, SimulationConfig, StepStats};
pub use render::Renderer;

use geom::vec2;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the node system.
///
/// This struct wraps the internal NodeSystem and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct NodeSystemWasm {
    system: NodeSystem,
}

#[wasm_bindgen]
impl NodeSystemWasm {
    /// Create a new empty node system.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            system: NodeSystem::new(),
        }
    }

    /// Create a node system preloaded with the demo spiral chain.
    pub fn demo() -> Result<NodeSystemWasm, JsError> {
        Ok(Self {
            system: NodeSystem::demo()?,
        })
    }

    /// The default simulation parameters as a plain object.
    #[wasm_bindgen(js_name = defaultConfig)]
    pub fn default_config() -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&SimulationConfig::default())?)
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node at the specified position.
    ///
    /// `color` is packed as `0xRRGGBBAA`. Returns the stable node ID.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, x: f32, y: f32, color: u32) -> u32 {
        self.system
            .add_node(vec2(x, y), Color::from_rgba_u32(color))
            .raw()
    }

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.system.node_count() as u32
    }

    /// Get a node's X position.
    #[wasm_bindgen(js_name = getNodeX)]
    pub fn get_node_x(&self, node_id: u32) -> Option<f32> {
        self.system.position(NodeId(node_id)).ok().map(|p| p.x)
    }

    /// Get a node's Y position.
    #[wasm_bindgen(js_name = getNodeY)]
    pub fn get_node_y(&self, node_id: u32) -> Option<f32> {
        self.system.position(NodeId(node_id)).ok().map(|p| p.y)
    }

    /// Set a node's position.
    #[wasm_bindgen(js_name = setNodePosition)]
    pub fn set_node_position(&mut self, node_id: u32, x: f32, y: f32) -> Result<(), JsError> {
        Ok(self.system.set_position(NodeId(node_id), vec2(x, y))?)
    }

    #[wasm_bindgen(js_name = getNodeColor)]
    pub fn get_node_color(&self, node_id: u32) -> Option<u32> {
        self.system
            .node_color(NodeId(node_id))
            .ok()
            .map(Color::to_rgba_u32)
    }

    #[wasm_bindgen(js_name = setNodeColor)]
    pub fn set_node_color(&mut self, node_id: u32, color: u32) -> Result<(), JsError> {
        Ok(self
            .system
            .set_node_color(NodeId(node_id), Color::from_rgba_u32(color))?)
    }

    // =========================================================================
    // Bond Operations
    // =========================================================================

    /// Bond two nodes at their current distance.
    ///
    /// Throws if either node does not exist or both IDs are the same node.
    #[wasm_bindgen(js_name = addBond)]
    pub fn add_bond(&mut self, a: u32, b: u32) -> Result<u32, JsError> {
        Ok(self.system.add_bond(NodeId(a), NodeId(b))?.raw())
    }

    /// Bond two nodes with an explicit rest length and color.
    #[wasm_bindgen(js_name = addBondWithLength)]
    pub fn add_bond_with_length(
        &mut self,
        a: u32,
        b: u32,
        rest_length: f32,
        color: u32,
    ) -> Result<u32, JsError> {
        let id = self.system.add_bond_with(
            NodeId(a),
            NodeId(b),
            rest_length,
            Color::from_rgba_u32(color),
        )?;
        Ok(id.raw())
    }

    /// Get the number of bonds.
    #[wasm_bindgen(js_name = bondCount)]
    pub fn bond_count(&self) -> u32 {
        self.system.bond_count() as u32
    }

    /// Get bond endpoints as [a0, b0, a1, b1, ...].
    #[wasm_bindgen(js_name = getBondEndpoints)]
    pub fn get_bond_endpoints(&self) -> Vec<u32> {
        self.system
            .bonds()
            .iter()
            .flat_map(|bond| {
                let (a, b) = bond.endpoints();
                [a.raw(), b.raw()]
            })
            .collect()
    }

    /// Get bond colors, one packed `0xRRGGBBAA` per bond.
    #[wasm_bindgen(js_name = getBondColors)]
    pub fn get_bond_colors(&self) -> Vec<u32> {
        self.system
            .bonds()
            .iter()
            .map(|bond| bond.color().to_rgba_u32())
            .collect()
    }

    /// Get the IDs of nodes bonded to `node_id`.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Result<Vec<u32>, JsError> {
        let neighbors = self.system.neighbors(NodeId(node_id))?;
        Ok(neighbors.into_iter().map(NodeId::raw).collect())
    }

    // =========================================================================
    // Position Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of X positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately for GPU upload, do not store.
    #[wasm_bindgen(js_name = getPositionsXView)]
    pub fn get_positions_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.system.positions().xs()) }
    }

    /// Get a zero-copy view of Y positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately for GPU upload, do not store.
    #[wasm_bindgen(js_name = getPositionsYView)]
    pub fn get_positions_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.system.positions().ys()) }
    }

    /// Get node colors, one packed `0xRRGGBBAA` per node.
    #[wasm_bindgen(js_name = getNodeColors)]
    pub fn get_node_colors(&self) -> Vec<u32> {
        self.system
            .node_colors()
            .iter()
            .map(|color| color.to_rgba_u32())
            .collect()
    }

    // =========================================================================
    // Picking
    // =========================================================================

    /// First node (in insertion order) strictly within `radius` of a point.
    #[wasm_bindgen(js_name = nearestNode)]
    pub fn nearest_node(&self, x: f32, y: f32, radius: f32) -> Option<u32> {
        self.system.nearest_node(vec2(x, y), radius).map(NodeId::raw)
    }

    /// Find all nodes within a rectangular region.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<u32> {
        self.system
            .nodes_in_rect(vec2(min_x, min_y), vec2(max_x, max_y))
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Run one simulation step.
    ///
    /// `config` is a partial `SimulationConfig` object (missing fields take
    /// their defaults) or `undefined`. Returns the step statistics.
    pub fn step(&mut self, config: JsValue) -> Result<JsValue, JsError> {
        let config: SimulationConfig = if config.is_undefined() || config.is_null() {
            SimulationConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let stats = self.system.step(&config)?;
        Ok(serde_wasm_bindgen::to_value(&stats)?)
    }

    /// Spring pass only. Returns the number of bonds with coincident endpoints.
    #[wasm_bindgen(js_name = applyBondForces)]
    pub fn apply_bond_forces(&mut self) -> u32 {
        self.system.apply_bond_forces() as u32
    }

    /// Centroid pass only. Returns false when there are no nodes.
    #[wasm_bindgen(js_name = applyCentroidRepulsion)]
    pub fn apply_centroid_repulsion(&mut self, strength: f32) -> Result<bool, JsError> {
        Ok(self.system.apply_centroid_repulsion(strength)?)
    }

    /// Pairwise repulsion pass only. Returns the number of interacting pairs.
    #[wasm_bindgen(js_name = applyPairwiseRepulsion)]
    pub fn apply_pairwise_repulsion(
        &mut self,
        max_range: f32,
        strength: f32,
    ) -> Result<u32, JsError> {
        let stats = self.system.apply_pairwise_repulsion(max_range, strength)?;
        Ok(stats.interacting as u32)
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Get the centroid as [x, y]. Throws on an empty node system.
    #[wasm_bindgen(js_name = getCentroid)]
    pub fn get_centroid(&self) -> Result<Vec<f32>, JsError> {
        let center = self.system.centroid()?;
        Ok(vec![center.x, center.y])
    }

    /// Get the bounding box of all nodes.
    ///
    /// Returns [min_x, min_y, max_x, max_y], or None if there are no nodes.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        self.system
            .bounds()
            .map(|b| vec![b.min.x, b.min.y, b.max.x, b.max.y])
    }

    #[wasm_bindgen(js_name = getDrawOffsetX)]
    pub fn get_draw_offset_x(&self) -> f32 {
        self.system.draw_offset().x
    }

    #[wasm_bindgen(js_name = getDrawOffsetY)]
    pub fn get_draw_offset_y(&self) -> f32 {
        self.system.draw_offset().y
    }

    /// Store the screen translation used by the renderer and input layer.
    #[wasm_bindgen(js_name = setDrawOffset)]
    pub fn set_draw_offset(&mut self, x: f32, y: f32) {
        self.system.set_draw_offset(vec2(x, y));
    }
}

impl Default for NodeSystemWasm {
    fn default() -> Self {
        Self::new()
    }
}
