//! Error types for voice-memo playback.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing a recording for playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Audio source unavailable: {}", .0.display())]
    SourceUnavailable(PathBuf),

    #[error("Audio source is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Audio I/O error: {0}")]
    Io(#[from] std::io::Error),
}
