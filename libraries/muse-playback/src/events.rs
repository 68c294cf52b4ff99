//! Player events
//!
//! Event-based communication for player state changes. The controller
//! queues events as transitions happen; embedders drain the queue and
//! react (update UI, forward play/download notifications to the site).

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// The current song changed
    SongChanged {
        /// Id of the new song, if it has one
        song_id: Option<String>,
        /// Id of the previously current song, if any
        previous_song_id: Option<String>,
    },

    /// A song started playing for the first time since it was loaded
    ///
    /// Emitted at most once per `play` invocation; pause/resume cycles and
    /// repeat restarts never re-emit it. Songs without an id never produce
    /// this event.
    SongPlayed {
        /// Site id of the song
        song_id: String,
    },

    /// A tracked download was issued for a song
    SongDownloaded {
        /// Site id of the song
        song_id: String,
    },

    /// The current song played to the end
    SongFinished {
        /// Id of the finished song, if it has one
        song_id: Option<String>,
    },

    /// The playlist was replaced
    PlaylistChanged {
        /// Number of songs in the new playlist
        length: usize,
    },

    /// Shuffle was toggled
    ShuffleChanged {
        /// Whether shuffle is now enabled
        shuffled: bool,
    },

    /// Repeat was toggled
    RepeatChanged {
        /// Whether repeat is now enabled
        repeating: bool,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume, 0.0-1.0
        volume: f32,
    },

    /// An error occurred during playback
    Error {
        /// Error description
        message: String,
    },
}
