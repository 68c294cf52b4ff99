//! Platform-agnostic player controller for Muse Player
//!
//! Core playback logic extracted from the Muse web player: playlist
//! traversal with wrap-around, shuffle (with exact original-order
//! restore), repeat, seek and volume, plus one-shot play reporting. The
//! actual audio rendering sits behind the [`AudioOutput`] trait so the
//! same controller drives any backend (media-element bridge, native
//! sink, test double).
//!
//! The controller is synchronous and single-owner; observers consume
//! [`PlayerEvent`]s via [`PlayerController::drain_events`] from their
//! update loop, which should also call [`PlayerController::poll`] so the
//! controller notices when a song ends.
//!
//! # Example
//!
//! ```rust
//! use muse_playback::{AudioOutput, PlayerConfig, PlayerController, PlayerEvent, Song};
//! use std::time::Duration;
//!
//! // A silent output; real embedders bridge to an actual audio backend.
//! struct NullOutput {
//!     playing: bool,
//!     position: Duration,
//! }
//!
//! impl AudioOutput for NullOutput {
//!     fn load(&mut self, _url: &str) -> muse_playback::Result<()> {
//!         self.position = Duration::ZERO;
//!         Ok(())
//!     }
//!     fn start(&mut self) -> muse_playback::Result<()> {
//!         self.playing = true;
//!         Ok(())
//!     }
//!     fn pause(&mut self) {
//!         self.playing = false;
//!     }
//!     fn seek(&mut self, position: Duration) -> muse_playback::Result<()> {
//!         self.position = position;
//!         Ok(())
//!     }
//!     fn position(&self) -> Duration {
//!         self.position
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn is_finished(&self) -> bool {
//!         false
//!     }
//! }
//!
//! # fn main() -> Result<(), muse_playback::PlayerError> {
//! let output = NullOutput { playing: false, position: Duration::ZERO };
//! let mut player = PlayerController::new(Box::new(output), PlayerConfig::default());
//!
//! let songs = vec![
//!     Song {
//!         id: Some("1".to_string()),
//!         title: "First".to_string(),
//!         artist: "Band".to_string(),
//!         audio_url: "https://music.example.com/media/1.mp3".to_string(),
//!         cover_url: None,
//!     },
//!     Song {
//!         id: Some("2".to_string()),
//!         title: "Second".to_string(),
//!         artist: "Band".to_string(),
//!         audio_url: "https://music.example.com/media/2.mp3".to_string(),
//!         cover_url: None,
//!     },
//! ];
//!
//! player.play(songs[0].clone(), songs.clone(), 0)?;
//! player.toggle_shuffle();
//! player.next()?;
//!
//! for event in player.drain_events() {
//!     if let PlayerEvent::SongPlayed { song_id } = event {
//!         // Forward to the site's play-tracking endpoint
//!         println!("played {}", song_id);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod events;
mod output;
mod playlist;
mod shuffle;
pub mod types;

pub use controller::PlayerController;
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use output::AudioOutput;
pub use types::{PlaybackState, PlayerConfig, Song};
