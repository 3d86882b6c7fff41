//! Configuration file support for noteink.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/noteink/config.toml`. Settings include the starting tool,
//! undo/redo behavior, thumbnail snapshots, playback sampling and drawing file storage.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{PaletteColor, SnapshotBackground, StorageCompression};
pub use types::{DrawingConfig, HistoryConfig, PlaybackConfig, SnapshotConfig, StorageConfig};

use crate::draw::render::MAX_SNAPSHOT_SIZE;
use crate::ink::tool::{MAX_WIDTH, MIN_WIDTH};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "teal"
/// default_width = 6.0
/// line_cap = "butt"
///
/// [history]
/// redo_policy = "keep"
///
/// [snapshot]
/// width = 256
/// height = 256
/// background = "white"
///
/// [playback]
/// tick_ms = 50
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool (color, width, cap, join, opacity)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo/redo behavior
    #[serde(default)]
    pub history: HistoryConfig,

    /// Note thumbnail rendering
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Voice-memo position sampling
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Drawing file compression, limits and backups
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 64.0
    /// - `opacity`: 0.0 - 1.0
    /// - `snapshot.width` / `snapshot.height`: 1 - 4096
    /// - `tick_ms`: 10 - 1000
    /// - `max_file_size_bytes`, `auto_compress_threshold_bytes`, `max_strokes`: at least 1
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.drawing.default_width) {
            warn!(
                "Invalid default_width {:.1}, clamping to {:.0}-{:.0} range",
                self.drawing.default_width, MIN_WIDTH, MAX_WIDTH
            );
            // NaN survives clamp, so fall back to the default explicitly.
            self.drawing.default_width = if self.drawing.default_width.is_nan() {
                DrawingConfig::default().default_width
            } else {
                self.drawing.default_width.clamp(MIN_WIDTH, MAX_WIDTH)
            };
        }

        if !(0.0..=1.0).contains(&self.drawing.opacity) {
            warn!(
                "Invalid opacity {:.2}, clamping to 0.0-1.0 range",
                self.drawing.opacity
            );
            self.drawing.opacity = if self.drawing.opacity.is_nan() {
                1.0
            } else {
                self.drawing.opacity.clamp(0.0, 1.0)
            };
        }

        // Normalise to an index; unknown names warn here.
        self.drawing.default_color =
            PaletteColor::Index(self.drawing.default_color.to_palette_index());

        if !(1..=MAX_SNAPSHOT_SIZE).contains(&self.snapshot.width) {
            warn!(
                "Invalid snapshot width {}, clamping to 1-{} range",
                self.snapshot.width, MAX_SNAPSHOT_SIZE
            );
            self.snapshot.width = self.snapshot.width.clamp(1, MAX_SNAPSHOT_SIZE);
        }

        if !(1..=MAX_SNAPSHOT_SIZE).contains(&self.snapshot.height) {
            warn!(
                "Invalid snapshot height {}, clamping to 1-{} range",
                self.snapshot.height, MAX_SNAPSHOT_SIZE
            );
            self.snapshot.height = self.snapshot.height.clamp(1, MAX_SNAPSHOT_SIZE);
        }

        if !(10..=1000).contains(&self.playback.tick_ms) {
            warn!(
                "Invalid tick_ms {}, clamping to 10-1000 range",
                self.playback.tick_ms
            );
            self.playback.tick_ms = self.playback.tick_ms.clamp(10, 1000);
        }

        if self.storage.max_file_size_bytes == 0 {
            warn!("storage.max_file_size_bytes must be positive, using 1");
            self.storage.max_file_size_bytes = 1;
        }

        if self.storage.auto_compress_threshold_bytes == 0 {
            warn!("storage.auto_compress_threshold_bytes must be positive, using 1");
            self.storage.auto_compress_threshold_bytes = 1;
        }

        if self.storage.max_strokes == 0 {
            warn!("storage.max_strokes must be positive, using 1");
            self.storage.max_strokes = 1;
        }
    }

    /// Interval between playback position samples.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.playback.tick_ms)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/noteink/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("noteink");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `path`, or returns defaults if the file does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Serializes the config to TOML and writes it to `path`, creating the
    /// parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }
}
