//! Property-based tests for the player controller
//!
//! Uses proptest to verify traversal, shuffle and clamping invariants
//! across many random playlists and operation sequences.

use muse_playback::{AudioOutput, PlayerConfig, PlayerController, Song};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Helpers =====

#[derive(Default)]
struct SharedState {
    duration: Option<Duration>,
    position: Duration,
    last_seek: Option<Duration>,
    finished: bool,
}

/// Minimal output whose state tests can reach after boxing
#[derive(Clone, Default)]
struct FakeOutput {
    state: Arc<Mutex<SharedState>>,
}

impl FakeOutput {
    fn set_duration(&self, duration: Duration) {
        self.state.lock().unwrap().duration = Some(duration);
    }

    fn finish(&self) {
        self.state.lock().unwrap().finished = true;
    }

    fn last_seek(&self) -> Option<Duration> {
        self.state.lock().unwrap().last_seek
    }
}

impl AudioOutput for FakeOutput {
    fn load(&mut self, _url: &str) -> muse_playback::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.position = Duration::ZERO;
        state.finished = false;
        Ok(())
    }

    fn start(&mut self) -> muse_playback::Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, position: Duration) -> muse_playback::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.position = position;
        state.last_seek = Some(position);
        state.finished = false;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn is_finished(&self) -> bool {
        self.state.lock().unwrap().finished
    }
}

fn create_player() -> (PlayerController, FakeOutput) {
    let output = FakeOutput::default();
    let player = PlayerController::new(Box::new(output.clone()), PlayerConfig::default());
    (player, output)
}

/// f32 control inputs, including the non-finite values division can produce
fn control_input() -> impl Strategy<Value = f32> {
    prop_oneof![
        7 => -10.0f32..10.0,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

fn arbitrary_song() -> impl Strategy<Value = Song> {
    (
        "[a-z0-9]{1,10}",   // id
        "[A-Za-z ]{1,30}",  // title
        "[A-Za-z ]{1,20}",  // artist
    )
        .prop_map(|(id, title, artist)| Song {
            audio_url: format!("https://music.example.com/media/{}.mp3", id),
            id: Some(id),
            title,
            artist,
            cover_url: None,
        })
}

fn arbitrary_songs() -> impl Strategy<Value = Vec<Song>> {
    prop::collection::vec(arbitrary_song(), 1..40)
}

// ===== Property Tests =====

proptest! {
    /// Property: n calls to next() visit every position once and wrap
    /// back to the start
    #[test]
    fn next_visits_every_position_once(songs in arbitrary_songs(), start in 0usize..40) {
        let start = start % songs.len();
        let (mut player, _output) = create_player();
        player.play(songs[start].clone(), songs.clone(), start).unwrap();

        let mut visited = Vec::new();
        for _ in 0..songs.len() {
            player.next().unwrap();
            visited.push(player.get_current_index().unwrap());
        }

        let unique: HashSet<usize> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), songs.len(), "Positions revisited during one cycle");
        prop_assert_eq!(player.get_current_index(), Some(start), "Cycle did not wrap to start");
    }

    /// Property: previous then next returns to the starting position when
    /// nothing has played yet
    #[test]
    fn previous_then_next_round_trips(songs in arbitrary_songs(), start in 0usize..40) {
        let start = start % songs.len();
        let (mut player, _output) = create_player();
        player.play(songs[start].clone(), songs, start).unwrap();

        player.previous().unwrap();
        player.next().unwrap();

        prop_assert_eq!(player.get_current_index(), Some(start));
    }

    /// Property: shuffle never loses or duplicates songs
    #[test]
    fn shuffle_preserves_song_set(songs in arbitrary_songs()) {
        let (mut player, _output) = create_player();
        let original_ids: HashSet<Option<String>> =
            songs.iter().map(|s| s.id.clone()).collect();
        player.play(songs[0].clone(), songs.clone(), 0).unwrap();

        player.toggle_shuffle();

        let shuffled_ids: HashSet<Option<String>> = player
            .get_playlist()
            .iter()
            .map(|s| s.id.clone())
            .collect();
        prop_assert_eq!(player.get_playlist().len(), songs.len(), "Shuffle changed song count");
        prop_assert_eq!(original_ids, shuffled_ids, "Shuffle lost or duplicated songs");
    }

    /// Property: un-shuffling restores the original order even after
    /// navigating while shuffled
    #[test]
    fn shuffle_restore_survives_navigation(
        songs in arbitrary_songs(),
        steps in prop::collection::vec(prop::bool::ANY, 0..10)
    ) {
        let (mut player, _output) = create_player();
        let original_order: Vec<Option<String>> =
            songs.iter().map(|s| s.id.clone()).collect();
        player.play(songs[0].clone(), songs, 0).unwrap();

        player.toggle_shuffle();
        for forward in steps {
            if forward {
                player.next().unwrap();
            } else {
                player.previous().unwrap();
            }
        }
        player.toggle_shuffle();

        let restored_order: Vec<Option<String>> = player
            .get_playlist()
            .iter()
            .map(|s| s.id.clone())
            .collect();
        prop_assert_eq!(original_order, restored_order, "Shuffle restore failed");
    }

    /// Property: the current index stays valid under any operation mix
    #[test]
    fn index_stays_valid_under_random_ops(
        songs in arbitrary_songs(),
        operations in prop::collection::vec(0u8..6, 1..30)
    ) {
        let (mut player, output) = create_player();
        player.play(songs[0].clone(), songs, 0).unwrap();

        for op in operations {
            match op {
                0 => { player.next().unwrap(); }
                1 => { player.previous().unwrap(); }
                2 => player.toggle_shuffle(),
                3 => player.toggle_repeat(),
                4 => { player.toggle().unwrap(); }
                _ => {
                    output.finish();
                    player.poll().unwrap();
                }
            }

            let index = player.get_current_index().unwrap();
            prop_assert!(index < player.get_playlist().len(), "Index out of bounds: {}", index);
        }
    }

    /// Property: fractional seeks land within the song; non-finite
    /// fractions never seek at all
    #[test]
    fn seek_fraction_stays_within_duration(
        fraction in control_input(),
        duration_secs in 1u64..600
    ) {
        let (mut player, output) = create_player();
        let song = Song {
            id: Some("s".to_string()),
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            audio_url: "https://music.example.com/media/s.mp3".to_string(),
            cover_url: None,
        };
        player.play(song, Vec::new(), 0).unwrap();
        output.set_duration(Duration::from_secs(duration_secs));

        player.seek_to_fraction(fraction).unwrap();

        match output.last_seek() {
            Some(target) => {
                prop_assert!(
                    target <= Duration::from_secs(duration_secs),
                    "Seek overshot the duration: {:?}",
                    target
                );
            }
            None => {
                prop_assert!(!fraction.is_finite(), "Finite fraction did not seek");
            }
        }
    }

    /// Property: volume stays in 0.0-1.0 for any input
    #[test]
    fn volume_clamped_to_range(volume in control_input()) {
        let (mut player, _output) = create_player();
        player.set_volume(volume);

        let actual = player.get_volume();
        prop_assert!((0.0..=1.0).contains(&actual), "Volume out of range: {}", actual);
    }
}
