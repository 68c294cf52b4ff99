//! Core types for the player controller

use serde::{Deserialize, Serialize};

/// A playable song as provided by the music site
///
/// Immutable once constructed; the controller never modifies a song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Site-assigned identifier
    ///
    /// Songs can be embedded without one; a missing id disables play and
    /// download tracking for that song and nothing else.
    pub id: Option<String>,
    /// Song title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Direct URL of the audio file
    pub audio_url: String,
    /// URL of the cover image, if any
    pub cover_url: Option<String>,
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No song has been loaded
    Idle,
    /// Song is playing
    Playing,
    /// Song is paused
    Paused,
}

/// Configuration for player behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume, 0.0-1.0 (default: 0.7)
    pub volume: f32,
    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,
    /// Start with repeat enabled (default: false)
    pub repeat: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            shuffle: false,
            repeat: false,
        }
    }
}
