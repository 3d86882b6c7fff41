//! Dirty region tracking for incremental rendering.
//!
//! Collects axis-aligned rectangles that the host needs to repaint between frames.

use super::stroke::{Point, Stroke};
use crate::util::{Bounds, Rect};

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds the bounding box for the given stroke, or full damage if none is available.
    pub fn mark_stroke(&mut self, stroke: &Stroke) {
        match stroke.bounding_box() {
            Some(rect) => self.mark_rect(rect),
            None => self.mark_full(),
        }
    }

    /// Adds the area covered by a run of points drawn at `width`.
    ///
    /// Used while a stroke grows so only the newest segment is repainted.
    pub fn mark_points(&mut self, points: &[Point], width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut bounds = Bounds::from_corners(first.x, first.y, first.x, first.y);
        for point in rest {
            bounds.include(point.x, point.y);
        }
        let padding = (width / 2.0).ceil().max(1.0);
        if let Some(rect) = bounds.inflate(padding).to_rect() {
            self.mark_rect(rect);
        }
    }

    /// Returns true if anything has been marked since the last drain.
    pub fn is_dirty(&self) -> bool {
        self.force_full || !self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            if width > 0 && height > 0 {
                if let Some(full) = Rect::new(0, 0, width, height) {
                    return vec![full];
                }
            }
            Vec::new()
        } else {
            self.regions.drain(..).collect()
        }
    }
}
