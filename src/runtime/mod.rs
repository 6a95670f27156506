use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::access::{FsProbe, PermissionGate};
use crate::app::App;
use crate::audio::RodioBackend;
use crate::config;
use crate::library::DirectoryIndex;

mod event_loop;
mod settings;
mod startup;

pub use settings::load_settings;

/// Puts the terminal in TUI mode and restores it when dropped, whichever way
/// `run` returns.
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        Self::enter_with(enable_raw_mode, enter_screen, restore_terminal)
    }

    /// Once `raw` succeeds the guard exists, so a failing `screen` still
    /// runs `restore`.
    fn enter_with(
        raw: impl FnOnce() -> io::Result<()>,
        screen: impl FnOnce() -> io::Result<()>,
        restore: fn(),
    ) -> io::Result<Self> {
        raw()?;
        let guard = Self { restore };
        screen()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn enter_screen() -> io::Result<()> {
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
}

/// Best effort: every step runs even if an earlier one fails.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
}

fn library_root(settings: &config::Settings) -> PathBuf {
    settings
        .library
        .root
        .clone()
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Open the output device and the library, then run the screen until exit.
pub fn run(settings: &config::Settings) -> anyhow::Result<()> {
    let root = library_root(settings);
    info!(root = %root.display(), "starting");

    let backend = RodioBackend::open_default(settings.audio.volume)
        .context("opening the default audio output")?;
    let mut app = App::new(
        backend,
        Duration::from_millis(settings.seek.poll_interval_ms),
        root.clone(),
    );
    let index = DirectoryIndex::new(root.clone(), settings.library.clone());
    let mut gate = PermissionGate::new(FsProbe, root);

    startup::open_library(&mut app, &mut gate, &index);

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut state = event_loop::EventLoopState::default();
    let mut cx = event_loop::Context {
        settings,
        app: &mut app,
        gate: &mut gate,
        index: &index,
    };
    event_loop::run(&mut terminal, &mut cx, &mut state)
}
