//! Configuration type definitions.

use super::enums::{PaletteColor, SnapshotBackground, StorageCompression};
use crate::draw::render::{DEFAULT_SNAPSHOT_SIZE, SnapshotOptions};
use crate::draw::{LineCap, LineJoin};
use crate::ink::RedoPolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool the host starts with. Users change these at runtime
/// through the toolbar; strokes keep whatever style they were begun with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a palette name (red, teal, deep-orange, ...) or a
    /// palette index
    #[serde(default = "default_color")]
    pub default_color: PaletteColor,

    /// Default line width in canvas units (valid range: 1.0 - 64.0)
    #[serde(default = "default_width")]
    pub default_width: f32,

    /// Line cap for new strokes (round, butt, square)
    #[serde(default)]
    pub line_cap: LineCap,

    /// Line join for new strokes (round, bevel, miter)
    #[serde(default)]
    pub line_join: LineJoin,

    /// Ink opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            opacity: default_opacity(),
        }
    }
}

/// Undo/redo behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// What completing a stroke does to pending redo entries
    /// ("discard-on-new-stroke" or "keep")
    #[serde(default)]
    pub redo_policy: RedoPolicy,
}

/// Raster snapshot defaults used for note thumbnails.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotConfig {
    /// Image width in pixels (valid range: 1 - 4096)
    #[serde(default = "default_snapshot_size")]
    pub width: i32,

    /// Image height in pixels (valid range: 1 - 4096)
    #[serde(default = "default_snapshot_size")]
    pub height: i32,

    /// "transparent" or "white"
    #[serde(default)]
    pub background: SnapshotBackground,

    /// Scale and center the strokes to fill the image instead of drawing 1:1
    #[serde(default)]
    pub fit_to_content: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            width: default_snapshot_size(),
            height: default_snapshot_size(),
            background: SnapshotBackground::default(),
            fit_to_content: false,
        }
    }
}

impl SnapshotConfig {
    pub fn to_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            width: self.width,
            height: self.height,
            background: self.background.to_color(),
            fit_to_content: self.fit_to_content,
        }
    }
}

/// Voice-memo playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlaybackConfig {
    /// Interval between position samples in milliseconds (valid range: 10 - 1000)
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

/// Drawing file settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// "off", "on" or "auto"
    #[serde(default)]
    pub compression: StorageCompression,

    /// JSON size above which "auto" compression kicks in
    #[serde(default = "default_auto_compress_threshold")]
    pub auto_compress_threshold_bytes: u64,

    /// Files larger than this are refused on load
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,

    /// Loaded stroke lists are truncated to this many strokes
    #[serde(default = "default_max_strokes")]
    pub max_strokes: usize,

    /// Keep the previous file as `<name>.bak` when overwriting
    #[serde(default = "default_keep_backup")]
    pub keep_backup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            compression: StorageCompression::default(),
            auto_compress_threshold_bytes: default_auto_compress_threshold(),
            max_file_size_bytes: default_max_file_size(),
            max_strokes: default_max_strokes(),
            keep_backup: default_keep_backup(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> PaletteColor {
    PaletteColor::Name("red".to_string())
}

fn default_width() -> f32 {
    8.0
}

fn default_opacity() -> f32 {
    1.0
}

fn default_snapshot_size() -> i32 {
    DEFAULT_SNAPSHOT_SIZE
}

fn default_tick_ms() -> u64 {
    100
}

fn default_auto_compress_threshold() -> u64 {
    100 * 1024
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_max_strokes() -> usize {
    10_000
}

fn default_keep_backup() -> bool {
    true
}
