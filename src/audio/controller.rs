use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use super::player::{AudioBackend, Player};
use super::types::{AudioAttributes, PlaybackError};

/// Whether a player handle currently exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    /// A handle exists; it may be playing, paused or stopped.
    Ready,
}

struct Active<P> {
    player: P,
    path: PathBuf,
}

/// Owns at most one player handle and drives it.
pub struct PlaybackController<B: AudioBackend> {
    // Must drop before `backend`.
    active: Option<Active<B::Player>>,
    backend: B,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.active.is_some() {
            ControllerState::Ready
        } else {
            ControllerState::Idle
        }
    }

    /// Replace the current handle with a fresh one for `path` and start it.
    ///
    /// The previous handle is stopped and released first, so on error the
    /// controller is `Idle`. Returns the new handle's reported duration.
    pub fn play(&mut self, path: &Path) -> Result<Option<Duration>, PlaybackError> {
        self.release();

        let mut player = self.backend.open(path, AudioAttributes::MUSIC)?;
        player.start();
        let duration = player.duration();
        info!(path = %path.display(), ?duration, "playback started");

        self.active = Some(Active {
            player,
            path: path.to_path_buf(),
        });
        Ok(duration)
    }

    pub fn resume(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.player.start();
        }
    }

    pub fn pause(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.player.pause();
        }
    }

    /// Stop and rewind the current handle without releasing it.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.player.stop();
            info!(path = %active.path.display(), "playback stopped");
        }
    }

    pub fn seek_to(&mut self, position: Duration) -> Result<(), PlaybackError> {
        match self.active.as_mut() {
            Some(active) => active.player.seek_to(position),
            None => Ok(()),
        }
    }

    /// Stop and drop the current handle. Returns whether there was one.
    pub fn release(&mut self) -> bool {
        match self.active.take() {
            Some(mut active) => {
                active.player.stop();
                true
            }
            None => false,
        }
    }

    pub fn position(&self) -> Option<Duration> {
        self.active.as_ref().map(|a| a.player.position())
    }

    pub fn is_playing(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.player.is_playing())
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }
}
