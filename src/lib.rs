//! Ink drawing engine and voice-memo playback positions for note-taking apps.
//!
//! The host feeds pointer events into an [`InkSession`], renders its strokes
//! with Cairo, and persists them through [`storage`]. Voice memos attached to
//! a note are driven by [`audio::NotePlayer`], which reports playback
//! positions as an async stream.

pub mod audio;
pub mod config;
pub mod draw;
pub mod ink;
pub mod storage;
pub mod util;

pub use config::Config;
pub use ink::{DrawMode, HistoryState, InkSession, PointerEvent, RedoPolicy, ToolConfig};
