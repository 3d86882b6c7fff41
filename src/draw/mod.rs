//! Ink primitives and Cairo rendering.
//!
//! This module defines the core drawing types used by the ink engine:
//! - [`Color`]: RGBA color representation and the indexed ink palette
//! - [`Stroke`]: one freehand gesture with a fixed [`StrokeStyle`]
//! - [`Frame`]: ordered stroke container (paint order = undo order)
//! - [`DirtyTracker`]: damage regions for incremental repaint
//! - Rendering functions for Cairo-based output and raster snapshots

pub mod color;
pub mod dirty;
pub mod frame;
pub mod render;
pub mod stroke;

// Re-export commonly used types at module level
pub use color::{Color, PALETTE, palette_color};
pub use dirty::DirtyTracker;
pub use frame::Frame;
pub use render::{
    RasterSnapshot, RenderError, SnapshotOptions, content_bounds, render_snapshot, render_stroke,
    render_strokes,
};
pub use stroke::{LineCap, LineJoin, Point, Stroke, StrokeId, StrokeStyle};
