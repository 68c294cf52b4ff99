//! Audio output abstraction
//!
//! The controller is platform-agnostic: it drives playback through the
//! [`AudioOutput`] trait and leaves the actual audio rendering to the
//! embedder (a media-element bridge, a native sink, a test double).

use crate::error::Result;
use std::time::Duration;

/// Platform audio output driven by the player controller
///
/// One song is loaded at a time; loading a new URL replaces the previous
/// source. Starting may fail after a successful load (decode error,
/// backend rejection); implementations surface that failure from
/// [`start`](AudioOutput::start).
pub trait AudioOutput: Send {
    /// Load a new audio source by URL, replacing any current one
    ///
    /// Playback does not begin until `start` is called.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback of the loaded source
    fn start(&mut self) -> Result<()>;

    /// Pause playback, keeping the current position
    fn pause(&mut self);

    /// Seek to a position from the start of the song
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Elapsed playback time of the loaded song
    fn position(&self) -> Duration;

    /// Total duration of the loaded song
    ///
    /// Returns `None` until the backend has loaded enough metadata to
    /// know it.
    fn duration(&self) -> Option<Duration>;

    /// Set the output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Whether the loaded song has played to its end
    fn is_finished(&self) -> bool;
}

/// Scriptable audio output for tests
///
/// Shares its state behind an `Arc` so a clone kept by the test can
/// inspect and steer the instance boxed into the controller.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct TestOutput {
    state: std::sync::Arc<std::sync::Mutex<TestOutputState>>,
}

#[cfg(test)]
#[derive(Default)]
struct TestOutputState {
    loaded_url: Option<String>,
    playing: bool,
    finished: bool,
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
    last_seek: Option<Duration>,
    fail_next_load: bool,
    fail_next_start: bool,
    load_count: usize,
    start_count: usize,
}

#[cfg(test)]
impl TestOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&self, position: Duration) {
        self.state.lock().unwrap().position = position;
    }

    pub fn set_duration(&self, duration: Option<Duration>) {
        self.state.lock().unwrap().duration = duration;
    }

    pub fn finish(&self) {
        self.state.lock().unwrap().finished = true;
    }

    pub fn fail_next_load(&self) {
        self.state.lock().unwrap().fail_next_load = true;
    }

    pub fn fail_next_start(&self) {
        self.state.lock().unwrap().fail_next_start = true;
    }

    pub fn loaded_url(&self) -> Option<String> {
        self.state.lock().unwrap().loaded_url.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn last_seek(&self) -> Option<Duration> {
        self.state.lock().unwrap().last_seek
    }

    pub fn load_count(&self) -> usize {
        self.state.lock().unwrap().load_count
    }

    pub fn start_count(&self) -> usize {
        self.state.lock().unwrap().start_count
    }

    pub fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }
}

#[cfg(test)]
impl AudioOutput for TestOutput {
    fn load(&mut self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next_load {
            state.fail_next_load = false;
            return Err(crate::error::PlayerError::AudioOutput(
                "simulated load failure".to_string(),
            ));
        }
        state.loaded_url = Some(url.to_string());
        state.playing = false;
        state.finished = false;
        state.position = Duration::ZERO;
        state.load_count += 1;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next_start {
            state.fail_next_start = false;
            return Err(crate::error::PlayerError::AudioOutput(
                "simulated start failure".to_string(),
            ));
        }
        state.playing = true;
        state.start_count += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.position = position;
        state.finished = false;
        state.last_seek = Some(position);
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.lock().unwrap().volume = volume;
    }

    fn is_finished(&self) -> bool {
        self.state.lock().unwrap().finished
    }
}
