//! Configuration enum types.

use crate::draw::{Color, PALETTE, color::WHITE};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default pen color - either a palette name or a palette index.
///
/// # Examples
/// ```toml
/// # Named palette entry
/// default_color = "red"
///
/// # Palette index (0 = black, 1 = red, ...)
/// default_color = 9
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum PaletteColor {
    /// Palette name: black, red, green, blue, magenta, cyan, yellow,
    /// deep-purple, purple, amber, teal, pink, deep-orange
    Name(String),
    /// Position in the 13-entry ink palette
    Index(usize),
}

impl PaletteColor {
    /// Resolves the setting to a palette index.
    ///
    /// Unknown names and out-of-range indices fall back to red (index 1) with
    /// a warning.
    pub fn to_palette_index(&self) -> usize {
        match self {
            PaletteColor::Name(name) => {
                crate::util::name_to_palette_index(name).unwrap_or_else(|| {
                    warn!("Unknown palette color '{}', using red", name);
                    1
                })
            }
            PaletteColor::Index(index) if *index < PALETTE.len() => *index,
            PaletteColor::Index(index) => {
                warn!(
                    "Palette index {} out of range (0-{}), using red",
                    index,
                    PALETTE.len() - 1
                );
                1
            }
        }
    }
}

/// Background painted behind snapshot strokes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotBackground {
    /// Leave unpainted pixels fully transparent
    #[default]
    Transparent,
    /// Fill with opaque white first
    White,
}

impl SnapshotBackground {
    pub fn to_color(self) -> Option<Color> {
        match self {
            SnapshotBackground::Transparent => None,
            SnapshotBackground::White => Some(WHITE),
        }
    }
}

/// Whether drawing files are gzip-compressed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StorageCompression {
    /// Always write plain JSON
    Off,
    /// Always gzip
    On,
    /// Gzip once the JSON exceeds `auto_compress_threshold_bytes`
    #[default]
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_color_resolves_names_and_indices() {
        assert_eq!(PaletteColor::Name("Teal".into()).to_palette_index(), 10);
        assert_eq!(PaletteColor::Index(0).to_palette_index(), 0);
    }

    #[test]
    fn invalid_palette_color_falls_back_to_red() {
        assert_eq!(PaletteColor::Name("orange".into()).to_palette_index(), 1);
        assert_eq!(PaletteColor::Index(13).to_palette_index(), 1);
    }

    #[test]
    fn untagged_palette_color_accepts_both_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: PaletteColor,
        }

        let named: Wrapper = toml::from_str("color = \"blue\"").unwrap();
        assert_eq!(named.color, PaletteColor::Name("blue".into()));

        let indexed: Wrapper = toml::from_str("color = 4").unwrap();
        assert_eq!(indexed.color, PaletteColor::Index(4));
    }
}
