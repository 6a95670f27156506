//! Application model: `App` and `PlaybackState`.
//!
//! The `App` struct holds the song list, the cursor, the displayed cover, the
//! seek bar and the playback controller. Every user action of the screen is a
//! method here; the runtime only maps input events onto them.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, warn};

use crate::access::AccessState;
use crate::audio::{AudioBackend, ControllerState, PlaybackController};
use crate::cover::{Cover, load_cover};
use crate::library::Song;
use crate::seek::{PositionPoll, SeekBar, SeekOrigin};

pub const ACCESS_DENIED_MESSAGE: &str =
    "Read access to the music library is required. Fix permissions and relaunch.";

/// The playback state as shown on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No player handle.
    #[default]
    Idle,
    Playing,
    /// Paused, or stopped and rewound.
    Paused,
}

/// The main application model.
pub struct App<B: AudioBackend> {
    pub songs: Vec<Song>,
    pub selected: usize,
    pub cover: Cover,
    pub seek: SeekBar,
    pub access: AccessState,
    /// Advisory or error text for the status box.
    pub status: Option<String>,
    pub library_root: PathBuf,

    /// Index of the song the current handle was opened for.
    playing_index: Option<usize>,
    playback: PlaybackController<B>,
    poll: PositionPoll,
}

impl<B: AudioBackend> App<B> {
    /// Create an `App` with an empty list; songs arrive once access is granted.
    pub fn new(backend: B, poll_interval: Duration, library_root: PathBuf) -> Self {
        Self {
            songs: Vec::new(),
            selected: 0,
            cover: Cover::Placeholder,
            seek: SeekBar::default(),
            access: AccessState::Unknown,
            status: None,
            library_root,

            playing_index: None,
            playback: PlaybackController::new(backend),
            poll: PositionPoll::new(poll_interval),
        }
    }

    pub fn playback(&self) -> &PlaybackController<B> {
        &self.playback
    }

    pub fn playback_state(&self) -> PlaybackState {
        match self.playback.state() {
            ControllerState::Idle => PlaybackState::Idle,
            ControllerState::Ready if self.playback.is_playing() => PlaybackState::Playing,
            ControllerState::Ready => PlaybackState::Paused,
        }
    }

    /// The song the current handle belongs to.
    pub fn now_playing(&self) -> Option<&Song> {
        self.playing_index.and_then(|i| self.songs.get(i))
    }

    /// Return true if the list contains any songs.
    pub fn has_songs(&self) -> bool {
        !self.songs.is_empty()
    }

    /// Replace the song list wholesale.
    pub fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.selected = 0;
        self.playing_index = None;
    }

    pub fn set_access(&mut self, state: AccessState) {
        self.access = state;
        if state == AccessState::Denied {
            self.status = Some(ACCESS_DENIED_MESSAGE.to_string());
        }
    }

    /// Play the song at index `i`: show its cover, then hand its path to the
    /// controller. Out-of-range indices are ignored.
    pub fn activate(&mut self, i: usize, now: Instant) -> bool {
        let Some(path) = self.songs.get(i).map(|s| s.path.clone()) else {
            return false;
        };
        self.selected = i;
        self.cover = load_cover(&path);

        match self.playback.play(&path) {
            Ok(duration) => {
                self.playing_index = Some(i);
                self.seek.reset_for(duration);
                self.poll.start(now);
                self.status = None;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "playback failed");
                self.playing_index = None;
                self.seek.reset_for(None);
                self.poll.cancel();
                self.status = Some(format!("Cannot play: {e}"));
            }
        }
        true
    }

    /// Play the song under the cursor.
    pub fn activate_selected(&mut self, now: Instant) -> bool {
        self.activate(self.selected, now)
    }

    pub fn resume(&mut self) {
        self.playback.resume();
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn toggle_pause(&mut self) {
        if self.playback.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Stop the handle and put the seek bar back at zero.
    pub fn stop(&mut self) {
        self.playback.stop();
        self.seek.apply(0, SeekOrigin::Program);
    }

    /// The user moved the seek bar to `value` (milliseconds).
    pub fn seek_from_user(&mut self, value: u64) {
        if self.playback.position().is_none() {
            return;
        }
        if let Some(target) = self.seek.apply(value, SeekOrigin::User) {
            if let Err(e) = self.playback.seek_to(target) {
                warn!(error = %e, "seek failed");
                self.status = Some(format!("Seek failed: {e}"));
            }
        }
    }

    /// Scrub relative to the current position by `delta_secs`.
    pub fn scrub(&mut self, delta_secs: i64) {
        let Some(position) = self.playback.position() else {
            return;
        };
        let current = position.as_millis() as i64;
        let target = current.saturating_add(delta_secs.saturating_mul(1000)).max(0);
        self.seek_from_user(target as u64);
    }

    /// Run the position poll if it is due: copy the handle's position into
    /// the seek bar.
    pub fn tick(&mut self, now: Instant) {
        if !self.poll.fire(now) {
            return;
        }
        match self.playback.position() {
            Some(position) => {
                self.seek
                    .apply(position.as_millis() as u64, SeekOrigin::Program);
            }
            None => self.poll.cancel(),
        }
    }

    /// How long the event loop may sleep before the next poll tick.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.poll.time_until_due(now)
    }

    pub fn is_polling(&self) -> bool {
        self.poll.is_running()
    }

    /// Move the cursor to the next song, wrapping around.
    pub fn next(&mut self) {
        if self.has_songs() {
            self.selected = (self.selected + 1) % self.songs.len();
        }
    }

    /// Move the cursor to the previous song, wrapping around.
    pub fn prev(&mut self) {
        if self.has_songs() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.songs.len() - 1);
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.songs.len().saturating_sub(1);
    }
}
