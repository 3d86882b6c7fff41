//! RGBA color type and the ink palette.

use log::warn;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use noteink::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let faded = red.with_opacity(0.5);
/// assert_eq!(faded.a, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from a packed `0xRRGGBB` value.
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f64 / 255.0,
            g: ((hex >> 8) & 0xFF) as f64 / 255.0,
            b: (hex & 0xFF) as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the same color with its alpha multiplied by `opacity` (clamped to 0.0-1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Ink colors offered by the drawing toolbar, addressed by index.
///
/// Strokes store the index rather than the color so a stored drawing keeps
/// following the palette.
pub const PALETTE: [Color; 13] = [
    BLACK,
    RED,
    GREEN,
    BLUE,
    MAGENTA,
    CYAN,
    YELLOW,
    Color::from_rgb_hex(0x651FFF), // deep purple
    Color::from_rgb_hex(0xD500F9), // purple
    Color::from_rgb_hex(0xFFEA00), // amber yellow
    Color::from_rgb_hex(0x1DE9B6), // teal
    Color::from_rgb_hex(0xF50057), // pink
    Color::from_rgb_hex(0xFF3D00), // deep orange
];

/// Looks up a palette color by index.
///
/// Out-of-range indices (e.g. from a drawing saved by a newer build) fall back
/// to the first palette entry.
pub fn palette_color(index: usize) -> Color {
    PALETTE.get(index).copied().unwrap_or_else(|| {
        warn!(
            "Palette index {} out of range (0-{}), using entry 0",
            index,
            PALETTE.len() - 1
        );
        PALETTE[0]
    })
}
