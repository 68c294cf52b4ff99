//! Error types for the player controller

use thiserror::Error;

/// Errors that can occur during playback control
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No song is currently loaded
    #[error("No song loaded")]
    NoSongLoaded,

    /// Index is out of playlist bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The audio backend failed to load, start or control playback
    #[error("Audio output error: {0}")]
    AudioOutput(String),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
