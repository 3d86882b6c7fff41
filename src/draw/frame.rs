//! Ordered stroke container used for both visible strokes and the redo buffer.

use super::stroke::{Stroke, StrokeId};
use crate::util::Bounds;
use serde::{Deserialize, Serialize};

/// Strokes in insertion order.
///
/// Insertion order is paint order (first = bottom layer, last = top layer) and
/// undo order. Each stroke id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    strokes: Vec<Stroke>,
}

impl Frame {
    /// Creates a new empty frame.
    pub const fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Stroke> {
        self.strokes.iter_mut()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.strokes.iter().any(|stroke| stroke.id == id)
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|stroke| stroke.id == id)
    }

    pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|stroke| stroke.id == id)
    }

    /// Appends a stroke on top of the existing ones.
    pub fn push(&mut self, stroke: Stroke) {
        debug_assert!(!self.contains(stroke.id), "duplicate stroke id {}", stroke.id);
        self.strokes.push(stroke);
    }

    /// Removes and returns the most recently inserted stroke, if any.
    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Removes every stroke with a sampled point inside `area`.
    ///
    /// Removed strokes are returned in their original order; the rest keep
    /// their relative order.
    pub fn remove_intersecting(&mut self, area: &Bounds) -> Vec<Stroke> {
        let (hit, kept): (Vec<Stroke>, Vec<Stroke>) = std::mem::take(&mut self.strokes)
            .into_iter()
            .partition(|stroke| stroke.intersects(area));
        self.strokes = kept;
        hit
    }

    /// Removes all strokes from the frame.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }
}

impl From<Vec<Stroke>> for Frame {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
