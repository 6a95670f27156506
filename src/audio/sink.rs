//! `rodio`-backed players.
//!
//! Each handle owns one `Sink` on the shared output mixer. Seeking and
//! restarting after a stop rebuild the sink and skip into the file, so they
//! work for every format the decoder can read.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use super::player::{AudioBackend, Player};
use super::types::{AudioAttributes, PlaybackError, Usage};

pub struct RodioBackend {
    stream: OutputStream,
    media_volume: f32,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open_default(media_volume: f32) -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            media_volume,
        })
    }
}

impl AudioBackend for RodioBackend {
    type Player = RodioPlayer;

    fn open(&self, path: &Path, attributes: AudioAttributes) -> Result<RodioPlayer, PlaybackError> {
        let volume = match attributes.usage {
            Usage::Media => self.media_volume,
        };
        debug!(path = %path.display(), ?attributes, volume, "preparing player");

        RodioPlayer::open(self.stream.mixer().clone(), path, volume)
    }
}

pub struct RodioPlayer {
    mixer: Mixer,
    path: PathBuf,
    sink: Sink,
    /// Position the current sink started at; `Sink::get_pos` counts from there.
    offset: Duration,
    /// The sink was cleared by `stop`; the next start rebuilds it from zero.
    stopped: bool,
    volume: f32,
    duration: Option<Duration>,
}

impl RodioPlayer {
    /// Decode `path` into a paused sink on `mixer`.
    fn open(mixer: Mixer, path: &Path, volume: f32) -> Result<Self, PlaybackError> {
        let (sink, decoded_duration) = create_sink_at(&mixer, path, Duration::ZERO, volume)?;
        let duration = decoded_duration.or_else(|| probe_duration(path));

        Ok(Self {
            mixer,
            path: path.to_path_buf(),
            sink,
            offset: Duration::ZERO,
            stopped: false,
            volume,
            duration,
        })
    }

    fn rebuild_at(&mut self, position: Duration, play: bool) -> Result<(), PlaybackError> {
        let (sink, _) = create_sink_at(&self.mixer, &self.path, position, self.volume)?;
        self.sink.stop();
        if play {
            sink.play();
        }
        self.sink = sink;
        self.offset = position;
        self.stopped = false;
        Ok(())
    }
}

impl Player for RodioPlayer {
    fn start(&mut self) {
        if !self.stopped && !self.sink.empty() {
            self.sink.play();
            return;
        }
        // Stopped, or played through to the end: start over from zero.
        if let Err(e) = self.rebuild_at(Duration::ZERO, true) {
            warn!(path = %self.path.display(), error = %e, "could not restart player");
        }
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.stop();
        self.offset = Duration::ZERO;
        self.stopped = true;
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), PlaybackError> {
        let position = match self.duration {
            Some(total) => position.min(total),
            None => position,
        };
        let play = !self.stopped && !self.sink.is_paused();
        self.rebuild_at(position, play)
    }

    fn position(&self) -> Duration {
        if self.stopped {
            return Duration::ZERO;
        }
        self.offset + self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_playing(&self) -> bool {
        !self.stopped && !self.sink.is_paused() && !self.sink.empty()
    }
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the total duration as reported by the decoder.
fn create_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(mixer);
    sink.set_volume(volume);
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}

/// Container-level duration for files whose decoder cannot report one.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
