//! Renderer capability handed to [`NodeSystem::draw`](crate::NodeSystem::draw).
//!
//! The core never owns a drawing surface; whoever drives the frame passes in
//! something that implements [`Renderer`]. Coordinates arrive already shifted
//! by the node system's draw offset.

use crate::geom::Vec2;
use crate::graph::Color;

pub trait Renderer {
    /// Draw a bond as a segment between its endpoints.
    fn draw_bond(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Draw a node centered on `center`.
    fn draw_node(&mut self, center: Vec2, color: Color);
}
