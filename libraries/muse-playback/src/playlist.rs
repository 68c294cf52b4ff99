//! Playlist state and traversal
//!
//! Keeps two orderings of the same songs:
//! - Active order: what `advance`/`retreat` walk, possibly shuffled
//! - Original order: the playlist as installed, restored exactly when
//!   shuffle is turned off
//!
//! Navigation never rebinds the original order; only `install` does.

use crate::error::{PlayerError, Result};
use crate::types::Song;

/// Ordered playlist with wrap-around traversal
#[derive(Debug, Clone)]
pub struct Playlist {
    /// Active order (possibly shuffled)
    songs: Vec<Song>,

    /// Order as installed, for restoring after shuffle
    original: Vec<Song>,

    /// Current position in the active order
    position: usize,

    /// Whether the active order is currently shuffled
    shuffled: bool,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            original: Vec::new(),
            position: 0,
            shuffled: false,
        }
    }

    /// Replace the playlist contents
    ///
    /// Rebinds the original order to the given songs and sets the current
    /// position. The shuffle flag is untouched: a playlist installed while
    /// shuffled plays in the given order until shuffle is toggled again.
    pub fn install(&mut self, songs: Vec<Song>, position: usize) -> Result<()> {
        if position >= songs.len() {
            return Err(PlayerError::IndexOutOfBounds(position));
        }
        self.original.clone_from(&songs);
        self.songs = songs;
        self.position = position;
        Ok(())
    }

    /// Number of songs in the playlist
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Current position in the active order
    pub fn position(&self) -> usize {
        self.position
    }

    /// Song at the current position
    pub fn current(&self) -> Option<&Song> {
        self.songs.get(self.position)
    }

    /// Songs in active order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Check if the active order is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Move to the next song, wrapping past the end to the start
    ///
    /// Returns the song at the new position, or `None` on an empty
    /// playlist.
    pub fn advance(&mut self) -> Option<&Song> {
        if self.songs.is_empty() {
            return None;
        }
        self.position = if self.position < self.songs.len() - 1 {
            self.position + 1
        } else {
            0
        };
        self.songs.get(self.position)
    }

    /// Move to the previous song, wrapping the start to the end
    ///
    /// Returns the song at the new position, or `None` on an empty
    /// playlist.
    pub fn retreat(&mut self) -> Option<&Song> {
        if self.songs.is_empty() {
            return None;
        }
        self.position = if self.position > 0 {
            self.position - 1
        } else {
            self.songs.len() - 1
        };
        self.songs.get(self.position)
    }

    /// Shuffle the active order
    ///
    /// Generates a fresh permutation of the original order, then relocates
    /// the current song (matched by id) so it keeps playing uninterrupted.
    pub fn shuffle(&mut self, current_id: Option<&str>) {
        self.shuffled = true;
        if self.original.is_empty() {
            return;
        }
        let mut shuffled = self.original.clone();
        crate::shuffle::shuffle_songs(&mut shuffled);
        self.songs = shuffled;
        self.relocate(current_id);
    }

    /// Restore the original order
    ///
    /// Used when turning shuffle off. Relocates the current song the same
    /// way `shuffle` does.
    pub fn restore_original_order(&mut self, current_id: Option<&str>) {
        self.shuffled = false;
        if self.original.is_empty() {
            return;
        }
        self.songs = self.original.clone();
        self.relocate(current_id);
    }

    /// Point `position` at the song with the given id after a reorder
    ///
    /// Without an id to match (or when the id is gone) the position is
    /// kept, clamped to the playlist bounds.
    fn relocate(&mut self, current_id: Option<&str>) {
        if let Some(id) = current_id {
            if let Some(index) = self
                .songs
                .iter()
                .position(|song| song.id.as_deref() == Some(id))
            {
                self.position = index;
                return;
            }
        }
        if self.position >= self.songs.len() && !self.songs.is_empty() {
            self.position = self.songs.len() - 1;
        }
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}
