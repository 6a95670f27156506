//! In-memory backend for exercising playback without an output device.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::player::{AudioBackend, Player};
use super::types::{AudioAttributes, PlaybackError};

#[derive(Debug, Clone)]
pub struct FakeHandle {
    pub path: PathBuf,
    pub attributes: AudioAttributes,
    pub position: Duration,
    pub playing: bool,
    pub released: bool,
}

#[derive(Default)]
struct Ledger {
    handles: Vec<FakeHandle>,
}

/// Shared-state backend; clones observe the same handles.
#[derive(Clone, Default)]
pub struct FakeBackend {
    ledger: Rc<RefCell<Ledger>>,
    durations: Rc<RefCell<HashMap<PathBuf, Duration>>>,
    broken: Rc<RefCell<HashSet<PathBuf>>>,
}

impl FakeBackend {
    pub fn with_duration(self, path: impl Into<PathBuf>, duration: Duration) -> Self {
        self.durations.borrow_mut().insert(path.into(), duration);
        self
    }

    /// Make `open` fail for `path`, like an unreadable or corrupt file.
    pub fn broken(self, path: impl Into<PathBuf>) -> Self {
        self.broken.borrow_mut().insert(path.into());
        self
    }

    /// Let time pass for every playing handle.
    pub fn advance(&self, by: Duration) {
        for h in self.ledger.borrow_mut().handles.iter_mut() {
            if h.playing && !h.released {
                h.position += by;
            }
        }
    }

    pub fn handles(&self) -> Vec<FakeHandle> {
        self.ledger.borrow().handles.clone()
    }

    pub fn live(&self) -> Vec<FakeHandle> {
        self.handles().into_iter().filter(|h| !h.released).collect()
    }
}

impl AudioBackend for FakeBackend {
    type Player = FakePlayer;

    fn open(&self, path: &Path, attributes: AudioAttributes) -> Result<FakePlayer, PlaybackError> {
        if self.broken.borrow().contains(path) {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }

        let mut ledger = self.ledger.borrow_mut();
        ledger.handles.push(FakeHandle {
            path: path.to_path_buf(),
            attributes,
            position: Duration::ZERO,
            playing: false,
            released: false,
        });

        Ok(FakePlayer {
            id: ledger.handles.len() - 1,
            duration: self.durations.borrow().get(path).copied(),
            ledger: self.ledger.clone(),
        })
    }
}

pub struct FakePlayer {
    id: usize,
    duration: Option<Duration>,
    ledger: Rc<RefCell<Ledger>>,
}

impl FakePlayer {
    fn with<R>(&self, f: impl FnOnce(&mut FakeHandle) -> R) -> R {
        f(&mut self.ledger.borrow_mut().handles[self.id])
    }
}

impl Player for FakePlayer {
    fn start(&mut self) {
        self.with(|h| h.playing = true);
    }

    fn pause(&mut self) {
        self.with(|h| h.playing = false);
    }

    fn stop(&mut self) {
        self.with(|h| {
            h.playing = false;
            h.position = Duration::ZERO;
        });
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), PlaybackError> {
        self.with(|h| h.position = position);
        Ok(())
    }

    fn position(&self) -> Duration {
        self.with(|h| h.position)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_playing(&self) -> bool {
        self.with(|h| h.playing)
    }
}

impl Drop for FakePlayer {
    fn drop(&mut self) {
        self.with(|h| {
            h.playing = false;
            h.released = true;
        });
    }
}

/// Write a 16-bit mono PCM WAV of `secs` seconds of square wave to `path`.
pub fn write_wav(path: &Path, secs: u32, sample_rate: u32) {
    let samples = secs * sample_rate;
    let data_len = samples * 2;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for i in 0..samples {
        let v: i16 = if i % 16 < 8 { 4_000 } else { -4_000 };
        out.extend_from_slice(&v.to_le_bytes());
    }
    fs::write(path, out).unwrap();
}
