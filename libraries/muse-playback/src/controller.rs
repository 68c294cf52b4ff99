//! Player controller - core playback orchestration
//!
//! Owns the current song, the playlist and the playback flags, and drives
//! an [`AudioOutput`] through state transitions. Observers read changes
//! from the event queue via [`PlayerController::drain_events`].

use crate::error::{PlayerError, Result};
use crate::events::PlayerEvent;
use crate::output::AudioOutput;
use crate::playlist::Playlist;
use crate::types::{PlaybackState, PlayerConfig, Song};
use std::time::Duration;
use tracing::{debug, warn};

/// Elapsed time beyond which `previous` restarts the current song instead
/// of going back
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Manages playback state, playlist traversal and the audio output
pub struct PlayerController {
    // Playback state
    state: PlaybackState,
    current_song: Option<Song>,

    // Playlist
    playlist: Playlist,

    // Modes and volume
    repeating: bool,
    volume: f32,

    // Audio backend
    output: Box<dyn AudioOutput>,

    // One-shot play report, armed on every load and consumed on the
    // first successful start of that load
    pending_play_report: Option<String>,

    // Event system
    pending_events: Vec<PlayerEvent>,
}

impl PlayerController {
    /// Create a new controller driving the given audio output
    ///
    /// A non-finite configured volume falls back to the default.
    pub fn new(mut output: Box<dyn AudioOutput>, config: PlayerConfig) -> Self {
        let volume = if config.volume.is_finite() {
            config.volume.clamp(0.0, 1.0)
        } else {
            PlayerConfig::default().volume
        };
        output.set_volume(volume);

        let mut playlist = Playlist::new();
        if config.shuffle {
            playlist.shuffle(None);
        }

        Self {
            state: PlaybackState::Idle,
            current_song: None,
            playlist,
            repeating: config.repeat,
            volume,
            output,
            pending_play_report: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start playing a song, optionally installing a new playlist
    ///
    /// A non-empty `playlist` replaces the current one, with `index` as the
    /// traversal position (callers normally pass the song's own position in
    /// it). An empty `playlist` keeps the existing traversal context and
    /// plays the song on its own.
    ///
    /// Audio start can fail after the song is committed (decode error,
    /// backend rejection). The failure is returned and also emitted as an
    /// [`Error`](PlayerEvent::Error) event, and the controller never claims
    /// to be playing; a later [`toggle`](Self::toggle) retries the start.
    pub fn play(&mut self, song: Song, playlist: Vec<Song>, index: usize) -> Result<()> {
        if !playlist.is_empty() {
            self.playlist.install(playlist, index)?;
            self.emit_playlist_changed();
        }
        self.load_and_start(song)
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.output.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Toggle between playing and paused
    ///
    /// No-op until a song has been loaded.
    pub fn toggle(&mut self) -> Result<()> {
        if self.current_song.is_none() {
            return Ok(());
        }
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Paused | PlaybackState::Idle => self.start_playback(),
        }
    }

    /// Skip to the next song
    ///
    /// With repeat enabled the current song restarts from the beginning
    /// instead. Wraps past the end of the playlist to the first song.
    /// No-op on an empty playlist.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }
        if self.repeating {
            return self.restart_current();
        }
        let song = match self.playlist.advance() {
            Some(song) => song.clone(),
            None => return Ok(()),
        };
        self.load_and_start(song)
    }

    /// Go back to the previous song
    ///
    /// More than three seconds into the current song this restarts it
    /// instead. Wraps the start of the playlist to the last song. No-op on
    /// an empty playlist.
    pub fn previous(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }
        if self.output.position() > RESTART_THRESHOLD {
            return self.restart_current();
        }
        let song = match self.playlist.retreat() {
            Some(song) => song.clone(),
            None => return Ok(()),
        };
        self.load_and_start(song)
    }

    /// Load a song into the output and start it
    ///
    /// The song is committed before the start attempt so the output and
    /// the controller always agree on what is loaded.
    fn load_and_start(&mut self, song: Song) -> Result<()> {
        if let Err(e) = self.output.load(&song.audio_url) {
            warn!(title = %song.title, error = %e, "Failed to load audio source");
            self.emit_error(e.to_string());
            return Err(e);
        }

        let previous_song_id = self.current_song.as_ref().and_then(|s| s.id.clone());
        let song_id = song.id.clone();

        // Arm the one-shot play report for this load
        self.pending_play_report = song.id.clone();
        self.current_song = Some(song);
        self.emit_song_changed(song_id, previous_song_id);

        self.start_playback()
    }

    /// Start the output and enter Playing on success
    fn start_playback(&mut self) -> Result<()> {
        match self.output.start() {
            Ok(()) => {
                self.set_state(PlaybackState::Playing);
                self.consume_play_report();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to start playback");
                // A loaded-but-not-started song is paused, not playing
                if self.state == PlaybackState::Playing {
                    self.set_state(PlaybackState::Paused);
                }
                self.emit_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Restart the current song from the beginning
    fn restart_current(&mut self) -> Result<()> {
        if self.current_song.is_none() {
            return Ok(());
        }
        self.output.seek(Duration::ZERO)?;
        self.start_playback()
    }

    /// Emit the pending play report, at most once per load
    fn consume_play_report(&mut self) {
        if let Some(song_id) = self.pending_play_report.take() {
            debug!(song_id = %song_id, "Song started playing");
            self.pending_events.push(PlayerEvent::SongPlayed { song_id });
        }
    }

    // ===== Playback Modes =====

    /// Toggle shuffle
    ///
    /// Enabling replaces the active order with a fresh permutation of the
    /// original order; disabling restores the original order. Either way
    /// the current song keeps playing and its index is relocated by id.
    pub fn toggle_shuffle(&mut self) {
        let enable = !self.playlist.is_shuffled();
        let current_id = self.current_song.as_ref().and_then(|s| s.id.clone());
        if enable {
            self.playlist.shuffle(current_id.as_deref());
        } else {
            self.playlist.restore_original_order(current_id.as_deref());
        }
        self.emit_shuffle_changed(enable);
    }

    /// Toggle repeat
    pub fn toggle_repeat(&mut self) {
        self.repeating = !self.repeating;
        self.emit_repeat_changed(self.repeating);
    }

    // ===== Seek & Volume =====

    /// Seek to a position in the current song
    pub fn seek_to(&mut self, position: Duration) -> Result<()> {
        if self.current_song.is_none() {
            return Err(PlayerError::NoSongLoaded);
        }
        self.output.seek(position)
    }

    /// Seek using a normalized progress fraction
    ///
    /// The fraction is clamped to 0.0-1.0; non-finite fractions are
    /// ignored. Does nothing while the duration is not yet known.
    pub fn seek_to_fraction(&mut self, fraction: f32) -> Result<()> {
        let Some(duration) = self.output.duration() else {
            return Ok(());
        };
        // NaN passes through clamp, and Duration::mul_f32 panics on it
        if !fraction.is_finite() {
            return Ok(());
        }
        let fraction = fraction.clamp(0.0, 1.0);
        self.output.seek(duration.mul_f32(fraction))
    }

    /// Set the output volume, clamped to 0.0-1.0
    ///
    /// Non-finite values are ignored; the current volume stays in effect.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        self.output.set_volume(volume);
        self.emit_volume_changed(volume);
    }

    // ===== Progress =====

    /// Advance controller state from the audio output
    ///
    /// Call this from the embedder's update loop. When the current song
    /// has played to its end the controller emits
    /// [`SongFinished`](PlayerEvent::SongFinished), then advances through
    /// the playlist, or pauses when there is none.
    pub fn poll(&mut self) -> Result<()> {
        if self.state == PlaybackState::Playing && self.output.is_finished() {
            return self.handle_song_finished();
        }
        Ok(())
    }

    fn handle_song_finished(&mut self) -> Result<()> {
        let song_id = self.current_song.as_ref().and_then(|s| s.id.clone());
        self.emit_song_finished(song_id);

        if self.playlist.is_empty() {
            self.pause();
            return Ok(());
        }
        self.next()
    }

    // ===== State Queries =====

    /// Get current playback state
    pub fn get_state(&self) -> PlaybackState {
        self.state
    }

    /// Get the currently loaded song
    pub fn get_current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    /// Get the playlist in active (possibly shuffled) order
    pub fn get_playlist(&self) -> &[Song] {
        self.playlist.songs()
    }

    /// Get the current playlist index
    ///
    /// `None` while no playlist is installed.
    pub fn get_current_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            None
        } else {
            Some(self.playlist.position())
        }
    }

    /// Get the current playback position
    pub fn get_position(&self) -> Duration {
        self.output.position()
    }

    /// Get the duration of the current song, if known
    pub fn get_duration(&self) -> Option<Duration> {
        self.output.duration()
    }

    /// Get the current volume (0.0-1.0)
    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    /// Check if shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.playlist.is_shuffled()
    }

    /// Check if repeat is enabled
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    // ===== Event System =====

    /// Record that a tracked download was issued for a song
    ///
    /// Observers receive [`SongDownloaded`](PlayerEvent::SongDownloaded).
    pub fn notify_downloaded(&mut self, song_id: impl Into<String>) {
        self.pending_events.push(PlayerEvent::SongDownloaded {
            song_id: song_id.into(),
        });
    }

    /// Drain pending events (call from the embedder's update loop)
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Change the playback state, emitting an event on real transitions
    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit_state_changed(state);
        }
    }

    /// Emit a state changed event
    fn emit_state_changed(&mut self, state: PlaybackState) {
        self.pending_events.push(PlayerEvent::StateChanged { state });
    }

    /// Emit a song changed event
    fn emit_song_changed(
        &mut self,
        song_id: Option<String>,
        previous_song_id: Option<String>,
    ) {
        self.pending_events.push(PlayerEvent::SongChanged {
            song_id,
            previous_song_id,
        });
    }

    /// Emit a song finished event
    fn emit_song_finished(&mut self, song_id: Option<String>) {
        self.pending_events.push(PlayerEvent::SongFinished { song_id });
    }

    /// Emit a playlist changed event
    fn emit_playlist_changed(&mut self) {
        let length = self.playlist.len();
        self.pending_events.push(PlayerEvent::PlaylistChanged { length });
    }

    /// Emit a shuffle changed event
    fn emit_shuffle_changed(&mut self, shuffled: bool) {
        self.pending_events.push(PlayerEvent::ShuffleChanged { shuffled });
    }

    /// Emit a repeat changed event
    fn emit_repeat_changed(&mut self, repeating: bool) {
        self.pending_events.push(PlayerEvent::RepeatChanged { repeating });
    }

    /// Emit a volume changed event
    fn emit_volume_changed(&mut self, volume: f32) {
        self.pending_events.push(PlayerEvent::VolumeChanged { volume });
    }

    /// Emit an error event
    fn emit_error(&mut self, message: impl Into<String>) {
        self.pending_events.push(PlayerEvent::Error {
            message: message.into(),
        });
    }
}
