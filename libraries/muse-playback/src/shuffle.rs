//! Playlist shuffling
//!
//! Uniform random permutation via Fisher-Yates, as provided by `rand`.

use crate::types::Song;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle songs in place
///
/// Every permutation is equally likely.
pub fn shuffle_songs(songs: &mut [Song]) {
    let mut rng = thread_rng();
    songs.shuffle(&mut rng);
}
