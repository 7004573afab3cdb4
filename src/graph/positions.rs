//! Node positions in Structure of Arrays layout.
//!
//! X and Y coordinates live in separate contiguous `f32` buffers so the
//! renderer can view them without copying. Every force pass reads and
//! writes positions through this buffer.

use crate::geom::{Vec2, vec2};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionBuffer {
    x: Vec<f32>,
    y: Vec<f32>,
}

impl PositionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Append a position and return its slot.
    pub fn push(&mut self, position: Vec2) -> usize {
        self.x.push(position.x);
        self.y.push(position.y);
        self.x.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Vec2 {
        vec2(self.x[index], self.y[index])
    }

    #[inline]
    pub fn set(&mut self, index: usize, position: Vec2) {
        self.x[index] = position.x;
        self.y[index] = position.y;
    }

    /// Move the position at `index` by `delta`.
    #[inline]
    pub fn translate(&mut self, index: usize, delta: Vec2) {
        self.x[index] += delta.x;
        self.y[index] += delta.y;
    }

    pub fn xs(&self) -> &[f32] {
        &self.x
    }

    pub fn ys(&self) -> &[f32] {
        &self.y
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| vec2(x, y))
    }

    /// Copy of every position, used by passes that must read a consistent
    /// frame while writing.
    pub fn snapshot(&self) -> Vec<Vec2> {
        self.iter().collect()
    }

    /// Add `deltas[i]` to position `i` for every slot.
    pub fn apply(&mut self, deltas: &[Vec2]) {
        debug_assert_eq!(deltas.len(), self.len());
        for (index, delta) in deltas.iter().enumerate() {
            self.translate(index, *delta);
        }
    }

    /// Arithmetic mean of all positions, or `None` when empty.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        let sum = self.iter().fold(Vec2::zero(), |acc, p| acc + p);
        Some(sum / self.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut buffer = PositionBuffer::new();
        assert_eq!(buffer.push(vec2(1.0, 2.0)), 0);
        assert_eq!(buffer.push(vec2(3.0, 4.0)), 1);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(1), vec2(3.0, 4.0));
        assert_eq!(buffer.xs(), &[1.0, 3.0]);
        assert_eq!(buffer.ys(), &[2.0, 4.0]);
    }

    #[test]
    fn test_translate_and_apply() {
        let mut buffer = PositionBuffer::with_capacity(2);
        buffer.push(vec2(0.0, 0.0));
        buffer.push(vec2(10.0, 0.0));

        buffer.translate(0, vec2(1.0, 1.0));
        assert_eq!(buffer.get(0), vec2(1.0, 1.0));

        buffer.apply(&[vec2(-1.0, 0.0), vec2(0.0, 2.0)]);
        assert_eq!(buffer.snapshot(), vec![vec2(0.0, 1.0), vec2(10.0, 2.0)]);
    }

    #[test]
    fn test_centroid() {
        let mut buffer = PositionBuffer::new();
        assert_eq!(buffer.centroid(), None);

        buffer.push(vec2(0.0, 0.0));
        buffer.push(vec2(10.0, 0.0));
        buffer.push(vec2(5.0, 10.0));

        let center = buffer.centroid().unwrap();
        assert!((center.x - 5.0).abs() < 1e-5);
        assert!((center.y - 10.0 / 3.0).abs() < 1e-5);
    }
}
