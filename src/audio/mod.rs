//! Voice-memo playback position reporting.
//!
//! The host owns the actual media player and plugs it in through
//! [`MediaPlayer`]. [`NotePlayer`] drives it and hands back a stream of
//! positions the UI can bind a seek bar to.

mod player;
mod position;
mod types;

pub use player::{ClockPlayer, MediaPlayer};
pub use position::{DEFAULT_TICK, NotePlayer, position_stream};
pub use types::PlaybackError;
