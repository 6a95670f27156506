//! Read-access gate for the music library.
//!
//! The gate probes the library root on launch. When access is missing it asks
//! the user once; the answer arrives later through the event loop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Where the gate stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessState {
    /// Not checked yet.
    Unknown,
    /// Waiting for the user to answer the access prompt.
    Prompting,
    Granted,
    Denied,
}

/// Checks whether the library can be read.
pub trait AccessProbe {
    fn probe(&self, root: &Path) -> io::Result<()>;
}

/// Probe that lists the root directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl AccessProbe for FsProbe {
    fn probe(&self, root: &Path) -> io::Result<()> {
        fs::read_dir(root).map(|_| ())
    }
}

pub struct PermissionGate<P> {
    probe: P,
    root: PathBuf,
    state: AccessState,
}

impl<P: AccessProbe> PermissionGate<P> {
    pub fn new(probe: P, root: impl Into<PathBuf>) -> Self {
        Self {
            probe,
            root: root.into(),
            state: AccessState::Unknown,
        }
    }

    /// Check access on launch. Moves to `Granted` or `Prompting`; later calls
    /// return the settled state without probing again.
    pub fn ensure(&mut self) -> AccessState {
        if self.state != AccessState::Unknown {
            return self.state;
        }

        self.state = match self.probe.probe(&self.root) {
            Ok(()) => AccessState::Granted,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "library not readable, prompting");
                AccessState::Prompting
            }
        };
        self.state
    }

    /// Deliver the prompt answer. Accepting re-probes once; there is no second prompt.
    pub fn respond(&mut self, accept: bool) -> AccessState {
        if self.state != AccessState::Prompting {
            return self.state;
        }

        self.state = if accept && self.probe.probe(&self.root).is_ok() {
            AccessState::Granted
        } else {
            AccessState::Denied
        };
        info!(state = ?self.state, "access prompt answered");
        self.state
    }
}
