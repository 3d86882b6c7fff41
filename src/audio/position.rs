use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, info};

use super::player::MediaPlayer;
use super::types::PlaybackError;

/// Interval between position samples unless configured otherwise.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

struct Sampler {
    player: Arc<dyn MediaPlayer>,
    tick: Duration,
    checked_playing: bool,
    last: Option<u32>,
    wait_before_sample: bool,
}

/// Streams the playback position of `player` in milliseconds.
///
/// The stream is empty if the player is not playing when it is first polled.
/// Otherwise it samples every `tick` until the position reaches the duration,
/// yielding only values that differ from the previous one. While the player
/// is paused the stream stays pending. Drop the stream to stop sampling.
pub fn position_stream(player: Arc<dyn MediaPlayer>, tick: Duration) -> BoxStream<'static, u32> {
    let sampler = Sampler {
        player,
        tick,
        checked_playing: false,
        last: None,
        wait_before_sample: false,
    };

    stream::unfold(sampler, |mut sampler| async move {
        if !sampler.checked_playing {
            sampler.checked_playing = true;
            if !sampler.player.is_playing() {
                debug!("Position stream polled while player idle; ending");
                return None;
            }
        }

        loop {
            if sampler.wait_before_sample {
                tokio::time::sleep(sampler.tick).await;
            }
            sampler.wait_before_sample = true;

            let position = sampler.player.current_position();
            if position >= sampler.player.duration() {
                debug!("Playback reached end at {} ms", position);
                return None;
            }
            if sampler.last != Some(position) {
                sampler.last = Some(position);
                return Some((position, sampler));
            }
        }
    })
    .boxed()
}

/// Plays voice memos attached to a note and reports their position.
pub struct NotePlayer {
    player: Arc<dyn MediaPlayer>,
    tick: Duration,
}

impl NotePlayer {
    pub fn new(player: Arc<dyn MediaPlayer>) -> Self {
        Self {
            player,
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_tick(self, tick: Duration) -> Self {
        Self { tick, ..self }
    }

    /// Starts `source` at `start_ms` and returns a fresh position stream.
    ///
    /// Any previous playback is reset first; streams returned by earlier calls
    /// keep sampling the same player until dropped.
    pub async fn play(
        &self,
        source: &Path,
        start_ms: u32,
    ) -> Result<BoxStream<'static, u32>, PlaybackError> {
        self.player.reset();
        self.player.prepare(source).await?;
        self.player.seek_to(start_ms);
        self.player.start();

        info!(
            "Playing {} from {} ms (duration {} ms)",
            source.display(),
            start_ms,
            self.player.duration()
        );
        Ok(position_stream(self.player.clone(), self.tick))
    }

    /// Pauses playback; open position streams stop producing new values.
    pub fn pause(&self) {
        self.player.pause();
        debug!("Paused at {} ms", self.player.current_position());
    }

    pub fn player(&self) -> &Arc<dyn MediaPlayer> {
        &self.player
    }
}
