//! Tool configuration applied to new strokes.

use crate::config::DrawingConfig;
use crate::draw::{LineCap, LineJoin, PALETTE, StrokeStyle};
use log::warn;

/// Thinnest and thickest accepted line widths in canvas units.
pub const MIN_WIDTH: f32 = 1.0;
pub const MAX_WIDTH: f32 = 64.0;

/// What a pointer-down starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Freehand ink (default)
    #[default]
    Pen,
    /// Rectangular eraser spanning the down point and the current pointer
    Erase,
}

/// Immutable snapshot of the toolbar state.
///
/// The host keeps one of these, replaces it whenever the user changes a tool
/// setting, and passes it to every pointer-down. A stroke copies the values it
/// needs when it begins, so changing the tool never restyles existing strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolConfig {
    /// Index into [`PALETTE`]
    pub color: usize,
    /// Line width in canvas units
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    pub mode: DrawMode,
    /// Identifies the tool session; copied into each stroke's style
    pub tool_id: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            color: 1,
            width: 8.0,
            cap: LineCap::Round,
            join: LineJoin::Round,
            opacity: 1.0,
            mode: DrawMode::Pen,
            tool_id: 0,
        }
    }
}

impl ToolConfig {
    /// Builds the initial tool from the `[drawing]` config section.
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self {
            color: config.default_color.to_palette_index(),
            width: config.default_width,
            cap: config.line_cap,
            join: config.line_join,
            opacity: config.opacity,
            ..Self::default()
        }
    }

    /// Selects a palette color. Out-of-range indices are ignored.
    pub fn with_color(self, index: usize) -> Self {
        if index >= PALETTE.len() {
            warn!(
                "Ignoring palette index {} (palette has {} colors)",
                index,
                PALETTE.len()
            );
            return self;
        }
        Self {
            color: index,
            ..self
        }
    }

    /// Sets the line width, clamped to `MIN_WIDTH..=MAX_WIDTH`.
    pub fn with_width(self, width: f32) -> Self {
        Self {
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            ..self
        }
    }

    pub fn with_cap_index(self, index: usize) -> Self {
        Self {
            cap: LineCap::from_index(index),
            ..self
        }
    }

    pub fn with_join_index(self, index: usize) -> Self {
        Self {
            join: LineJoin::from_index(index),
            ..self
        }
    }

    /// Sets the opacity, clamped to 0.0-1.0.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn with_mode(self, mode: DrawMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_tool_id(self, tool_id: u32) -> Self {
        Self { tool_id, ..self }
    }

    /// The style a stroke begun with this tool will carry.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width,
            cap: self.cap,
            join: self.join,
            opacity: self.opacity,
            tool_id: self.tool_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tool_matches_toolbar_defaults() {
        let tool = ToolConfig::default();
        assert_eq!(tool.color, 1);
        assert_eq!(tool.width, 8.0);
        assert_eq!(tool.cap, LineCap::Round);
        assert_eq!(tool.join, LineJoin::Round);
        assert_eq!(tool.opacity, 1.0);
        assert_eq!(tool.mode, DrawMode::Pen);
    }

    #[test]
    fn setters_clamp_and_ignore_invalid_values() {
        let tool = ToolConfig::default()
            .with_color(99)
            .with_width(500.0)
            .with_opacity(-0.5)
            .with_cap_index(1)
            .with_join_index(2);

        assert_eq!(tool.color, 1);
        assert_eq!(tool.width, MAX_WIDTH);
        assert_eq!(tool.opacity, 0.0);
        assert_eq!(tool.cap, LineCap::Butt);
        assert_eq!(tool.join, LineJoin::Miter);
    }

    #[test]
    fn from_config_uses_drawing_section() {
        let config = DrawingConfig {
            default_color: crate::config::PaletteColor::Name("teal".into()),
            default_width: 12.0,
            line_cap: LineCap::Square,
            opacity: 0.25,
            ..DrawingConfig::default()
        };
        let tool = ToolConfig::from_config(&config);

        assert_eq!(tool.color, 10);
        assert_eq!(tool.width, 12.0);
        assert_eq!(tool.cap, LineCap::Square);
        assert_eq!(tool.join, LineJoin::Round);
        assert_eq!(tool.opacity, 0.25);
        assert_eq!(tool.mode, DrawMode::Pen);
    }

    #[test]
    fn stroke_style_copies_tool_values() {
        let tool = ToolConfig::default()
            .with_color(4)
            .with_width(3.0)
            .with_opacity(0.5)
            .with_tool_id(7);
        let style = tool.stroke_style();

        assert_eq!(style.color, 4);
        assert_eq!(style.width, 3.0);
        assert_eq!(style.opacity, 0.5);
        assert_eq!(style.tool_id, 7);
    }
}
