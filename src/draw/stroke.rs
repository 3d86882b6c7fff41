//! Stroke definitions for freehand ink.

use crate::util::{Bounds, Rect};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sampled pointer position in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Unique, monotonically allocated stroke identity.
///
/// Two strokes with identical style are still distinct strokes, so the
/// session keys strokes by this id and never by style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(pub u64);

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape drawn at the open ends of a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

impl LineCap {
    /// Maps the toolbar's cap index (0 = round, 1 = butt, 2 = square).
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Round,
            1 => Self::Butt,
            2 => Self::Square,
            other => {
                warn!("Unknown line cap index {}, using round", other);
                Self::Round
            }
        }
    }

    pub fn to_cairo(self) -> cairo::LineCap {
        match self {
            Self::Round => cairo::LineCap::Round,
            Self::Butt => cairo::LineCap::Butt,
            Self::Square => cairo::LineCap::Square,
        }
    }
}

/// Shape drawn where two stroke segments meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
    Miter,
}

impl LineJoin {
    /// Maps the toolbar's join index (0 = round, 1 = bevel, 2 = miter).
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Round,
            1 => Self::Bevel,
            2 => Self::Miter,
            other => {
                warn!("Unknown line join index {}, using round", other);
                Self::Round
            }
        }
    }

    pub fn to_cairo(self) -> cairo::LineJoin {
        match self {
            Self::Round => cairo::LineJoin::Round,
            Self::Bevel => cairo::LineJoin::Bevel,
            Self::Miter => cairo::LineJoin::Miter,
        }
    }
}

/// Visual attributes captured when a stroke begins. Never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Index into [`crate::draw::color::PALETTE`]
    pub color: usize,
    /// Line width in canvas units
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    /// Tool session the stroke was drawn with
    pub tool_id: u32,
}

/// One continuous pen gesture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    pub style: StrokeStyle,
    /// Sampled positions in gesture order (first = pointer down)
    pub points: Vec<Point>,
}

impl Stroke {
    /// Starts a stroke with its first point.
    pub fn new(id: StrokeId, style: StrokeStyle, start: Point) -> Self {
        Self {
            id,
            style,
            points: vec![start],
        }
    }

    /// Returns true if any sampled point lies inside `area` (inclusive).
    pub fn intersects(&self, area: &Bounds) -> bool {
        self.points.iter().any(|point| area.contains(point.x, point.y))
    }

    /// Bounds of the sampled points, without stroke width.
    pub fn point_bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.points.split_first()?;
        let mut bounds = Bounds::from_corners(first.x, first.y, first.x, first.y);
        for point in rest {
            bounds.include(point.x, point.y);
        }
        Some(bounds)
    }

    /// Returns the pixel bounding box expanded to cover the stroke width.
    ///
    /// Suitable for damage hints. Returns `None` only for an empty stroke.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.point_bounds()?
            .inflate(stroke_padding(self.style.width))
            .to_rect()
    }
}

fn stroke_padding(width: f32) -> f32 {
    (width / 2.0).ceil().max(1.0)
}
