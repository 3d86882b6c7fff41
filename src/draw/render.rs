//! Cairo-based stroke replay and raster snapshots.

use super::color::{Color, palette_color};
use super::stroke::Stroke;
use crate::util::Bounds;
use log::debug;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

/// Default snapshot edge length in canvas units.
pub const DEFAULT_SNAPSHOT_SIZE: i32 = 100;

/// Largest snapshot edge accepted by [`render_snapshot`].
pub const MAX_SNAPSHOT_SIZE: i32 = 4096;

/// Errors that can occur while producing a raster snapshot.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid snapshot size {width}x{height} (expected 1-4096 per side)")]
    InvalidSize { width: i32, height: i32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Parameters for [`render_snapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotOptions {
    /// Target width in pixels
    pub width: i32,
    /// Target height in pixels
    pub height: i32,
    /// Solid fill painted before the strokes; `None` leaves the surface transparent
    pub background: Option<Color>,
    /// Scale and center the strokes' bounds into the target instead of drawing 1:1
    pub fit_to_content: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_SNAPSHOT_SIZE,
            height: DEFAULT_SNAPSHOT_SIZE,
            background: None,
            fit_to_content: false,
        }
    }
}

impl SnapshotOptions {
    /// 1:1 snapshot of the given size with a transparent background.
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// A rendered ARGB32 image of a drawing.
pub struct RasterSnapshot {
    surface: cairo::ImageSurface,
}

impl RasterSnapshot {
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Mutable access to the underlying surface (e.g. to read pixel data).
    pub fn surface_mut(&mut self) -> &mut cairo::ImageSurface {
        &mut self.surface
    }

    pub fn into_surface(self) -> cairo::ImageSurface {
        self.surface
    }

    /// Encodes the snapshot as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }

    /// Writes the snapshot as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), RenderError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.surface.write_to_png(&mut writer)?;
        Ok(())
    }
}

/// Renders all strokes to a Cairo context.
///
/// Strokes are drawn in slice order (first stroke = bottom layer), so later
/// strokes paint over earlier ones where they overlap.
pub fn render_strokes(ctx: &cairo::Context, strokes: &[Stroke]) {
    for stroke in strokes {
        render_stroke(ctx, stroke);
    }
}

/// Renders a single stroke as a polyline through its points.
///
/// A stroke with a single point is drawn as a dot (zero-length segment), so a
/// tap is visible with round or square caps.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    let Some((first, rest)) = stroke.points.split_first() else {
        return;
    };

    let style = &stroke.style;
    let color = palette_color(style.color).with_opacity(style.opacity as f64);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(style.width as f64);
    ctx.set_line_cap(style.cap.to_cairo());
    ctx.set_line_join(style.join.to_cairo());

    ctx.move_to(first.x as f64, first.y as f64);
    if rest.is_empty() {
        ctx.line_to(first.x as f64, first.y as f64);
    }
    for point in rest {
        ctx.line_to(point.x as f64, point.y as f64);
    }

    let _ = ctx.stroke();
}

/// Replays strokes onto a fresh surface of the requested size.
///
/// # Errors
/// Returns [`RenderError::InvalidSize`] when either side is outside
/// `1..=MAX_SNAPSHOT_SIZE`, or a Cairo error if the surface cannot be created.
pub fn render_snapshot(
    strokes: &[Stroke],
    options: &SnapshotOptions,
) -> Result<RasterSnapshot, RenderError> {
    let SnapshotOptions { width, height, .. } = *options;
    if !(1..=MAX_SNAPSHOT_SIZE).contains(&width) || !(1..=MAX_SNAPSHOT_SIZE).contains(&height) {
        return Err(RenderError::InvalidSize { width, height });
    }

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        ctx.set_antialias(cairo::Antialias::Best);

        if let Some(bg) = options.background {
            ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
            ctx.paint()?;
        }

        if options.fit_to_content {
            if let Some(content) = content_bounds(strokes) {
                apply_fit_transform(&ctx, &content, width, height);
            }
        }

        render_strokes(&ctx, strokes);
        ctx.status()?;
    }
    surface.flush();

    debug!(
        "Rendered {} strokes into {}x{} snapshot (fit={})",
        strokes.len(),
        width,
        height,
        options.fit_to_content
    );

    Ok(RasterSnapshot { surface })
}

/// Union of all strokes' point bounds, expanded by half of each stroke's width.
pub fn content_bounds(strokes: &[Stroke]) -> Option<Bounds> {
    strokes
        .iter()
        .filter_map(|stroke| {
            stroke
                .point_bounds()
                .map(|bounds| bounds.inflate(stroke.style.width / 2.0))
        })
        .reduce(|mut acc, next| {
            acc.include(next.min_x, next.min_y);
            acc.include(next.max_x, next.max_y);
            acc
        })
}

fn apply_fit_transform(ctx: &cairo::Context, content: &Bounds, width: i32, height: i32) {
    let content_w = content.width().max(1.0) as f64;
    let content_h = content.height().max(1.0) as f64;
    let scale = (width as f64 / content_w).min(height as f64 / content_h);

    let offset_x = (width as f64 - content_w * scale) / 2.0;
    let offset_y = (height as f64 - content_h * scale) / 2.0;

    ctx.translate(offset_x, offset_y);
    ctx.scale(scale, scale);
    ctx.translate(-content.min_x as f64, -content.min_y as f64);
}
