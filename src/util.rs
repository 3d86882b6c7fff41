//! Geometry helpers and palette name lookups.
//!
//! This module provides:
//! - [`Rect`]: integer pixel rectangles used for damage tracking
//! - [`Bounds`]: inclusive floating-point rectangles used for erase hit-testing
//! - Palette name mapping for the configuration file

use crate::draw::color::PALETTE;

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned pixel rectangle with positive area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Largest pixel coordinate a damage rectangle may reach in either direction.
pub const MAX_PIXEL_COORD: f32 = 1.0e9;

/// Inclusive floating-point rectangle in canvas units.
///
/// Built from two arbitrary corners (e.g. an erase gesture's anchor and the
/// current pointer), so it is always normalised with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Normalises two opposite corners into a rectangle.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Returns true if the point lies inside or on the edge of the rectangle.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Grows the rectangle to include the point.
    pub fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Snaps outward to whole pixels, guaranteeing at least a 1×1 area.
    ///
    /// Coordinates are clamped to `±MAX_PIXEL_COORD` so the pixel span always
    /// fits in an `i32`.
    pub fn to_rect(&self) -> Option<Rect> {
        let snap = |value: f32| value.clamp(-MAX_PIXEL_COORD, MAX_PIXEL_COORD) as i32;
        let min_x = snap(self.min_x.floor());
        let min_y = snap(self.min_y.floor());
        let mut max_x = snap(self.max_x.ceil());
        let mut max_y = snap(self.max_y.ceil());
        if max_x == min_x {
            max_x = max_x.saturating_add(1);
        }
        if max_y == min_y {
            max_y = max_y.saturating_add(1);
        }
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }
}

// ============================================================================
// Palette Names
// ============================================================================

/// Palette names accepted by the configuration file, in palette order.
pub const PALETTE_NAMES: [&str; PALETTE.len()] = [
    "black",
    "red",
    "green",
    "blue",
    "magenta",
    "cyan",
    "yellow",
    "deep-purple",
    "purple",
    "amber",
    "teal",
    "pink",
    "deep-orange",
];

/// Maps a palette color name (case-insensitive) to its palette index.
///
/// # Returns
/// - `Some(index)` if the name matches a palette entry
/// - `None` if the name is not recognized
pub fn name_to_palette_index(name: &str) -> Option<usize> {
    let name = name.to_lowercase();
    PALETTE_NAMES.iter().position(|candidate| *candidate == name)
}
