use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::time::Instant;

use super::types::PlaybackError;

/// Abstraction over the platform media player.
///
/// Positions and durations are in milliseconds. Methods take `&self` so one
/// player can be shared between the controller and the position stream.
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Stops playback and forgets the current source.
    fn reset(&self);
    /// Opens `source` and readies it for playback from position 0.
    async fn prepare(&self, source: &Path) -> Result<(), PlaybackError>;
    fn seek_to(&self, position_ms: u32);
    fn start(&self);
    fn pause(&self);
    fn is_playing(&self) -> bool;
    fn current_position(&self) -> u32;
    fn duration(&self) -> u32;
}

#[derive(Debug, Default)]
struct ClockState {
    prepared: bool,
    playing: bool,
    /// Position when playback last started or was paused/seeked
    base_position: u32,
    /// Set while playing
    started_at: Option<Instant>,
}

/// A [`MediaPlayer`] whose position follows the tokio clock.
///
/// Useful when audio output is routed elsewhere and only positions matter,
/// and for tests running with paused time. The duration is supplied up front.
#[derive(Debug)]
pub struct ClockPlayer {
    duration_ms: u32,
    state: Mutex<ClockState>,
}

impl ClockPlayer {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            state: Mutex::new(ClockState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position_of(&self, state: &ClockState) -> u32 {
        let elapsed = state
            .started_at
            .map(|at| u32::try_from(at.elapsed().as_millis()).unwrap_or(u32::MAX))
            .unwrap_or(0);
        state
            .base_position
            .saturating_add(elapsed)
            .min(self.duration_ms)
    }
}

#[async_trait]
impl MediaPlayer for ClockPlayer {
    fn reset(&self) {
        *self.state() = ClockState::default();
    }

    async fn prepare(&self, source: &Path) -> Result<(), PlaybackError> {
        let metadata = match tokio::fs::metadata(source).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PlaybackError::SourceUnavailable(source.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };
        if !metadata.is_file() {
            return Err(PlaybackError::NotAFile(source.to_path_buf()));
        }

        let mut state = self.state();
        *state = ClockState {
            prepared: true,
            ..ClockState::default()
        };
        debug!(
            "Prepared {} ({} ms)",
            source.display(),
            self.duration_ms
        );
        Ok(())
    }

    fn seek_to(&self, position_ms: u32) {
        let mut state = self.state();
        state.base_position = position_ms.min(self.duration_ms);
        if state.playing {
            state.started_at = Some(Instant::now());
        }
    }

    fn start(&self) {
        let mut state = self.state();
        if !state.prepared {
            warn!("start() called before prepare(); ignoring");
            return;
        }
        if !state.playing {
            state.playing = true;
            state.started_at = Some(Instant::now());
        }
    }

    fn pause(&self) {
        let mut state = self.state();
        if state.playing {
            state.base_position = self.position_of(&state);
            state.started_at = None;
            state.playing = false;
        }
    }

    fn is_playing(&self) -> bool {
        let state = self.state();
        state.playing && self.position_of(&state) < self.duration_ms
    }

    fn current_position(&self) -> u32 {
        self.position_of(&self.state())
    }

    fn duration(&self) -> u32 {
        self.duration_ms
    }
}
