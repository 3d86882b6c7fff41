use crate::config::{StorageCompression, StorageConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for drawing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

impl From<StorageCompression> for CompressionMode {
    fn from(value: StorageCompression) -> Self {
        match value {
            StorageCompression::Off => CompressionMode::Off,
            StorageCompression::On => CompressionMode::On,
            StorageCompression::Auto => CompressionMode::Auto,
        }
    }
}

/// Runtime options for reading and writing drawing files.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    pub max_file_size_bytes: u64,
    pub max_strokes: usize,
    pub keep_backup: bool,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            max_file_size_bytes: 10 * 1024 * 1024,
            max_strokes: 10_000,
            keep_backup: true,
        }
    }
}

impl StorageOptions {
    /// Build runtime options from the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            compression: config.compression.into(),
            auto_compress_threshold_bytes: config.auto_compress_threshold_bytes.max(1),
            max_file_size_bytes: config.max_file_size_bytes.max(1),
            max_strokes: config.max_strokes.max(1),
            keep_backup: config.keep_backup,
        }
    }
}

/// `note.json` -> `note.json.bak`
pub fn backup_file_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

/// `note.json` -> `note.json.lock`
pub fn lock_file_path(path: &Path) -> PathBuf {
    with_suffix(path, ".lock")
}

pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("drawing"));
    name.push(suffix);
    path.with_file_name(name)
}
