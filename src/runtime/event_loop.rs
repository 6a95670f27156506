use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;

use crate::access::{AccessProbe, AccessState, PermissionGate};
use crate::app::App;
use crate::audio::AudioBackend;
use crate::config;
use crate::library::MediaIndex;
use crate::runtime::startup;
use crate::ui::{self, Button};

/// Upper bound on how long the loop blocks waiting for input.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Frame size of the last draw, for mouse hit-testing.
    pub last_area: Rect,
}

/// Borrowed pieces the input handlers act on.
pub struct Context<'a, B: AudioBackend, P, I: ?Sized> {
    pub settings: &'a config::Settings,
    pub app: &'a mut App<B>,
    pub gate: &'a mut PermissionGate<P>,
    pub index: &'a I,
}

/// Main terminal event loop: runs the position poll, draws, and dispatches
/// input. Returns `Ok(())` when exit is requested.
pub fn run<B, P, I>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    cx: &mut Context<'_, B, P, I>,
    state: &mut EventLoopState,
) -> anyhow::Result<()>
where
    B: AudioBackend,
    P: AccessProbe,
    I: MediaIndex + ?Sized,
{
    loop {
        cx.app.tick(Instant::now());

        let completed = terminal.draw(|f| {
            ui::draw(f, cx.app, &cx.settings.ui, &cx.settings.controls)
        })?;
        state.last_area = completed.area;

        let timeout = cx
            .app
            .next_tick_in(Instant::now())
            .map_or(INPUT_POLL, |d| d.min(INPUT_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        let exit = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, cx, state),
            Event::Mouse(mouse) => handle_mouse_event(mouse, cx, state),
            _ => false,
        };
        if exit {
            info!("exit requested");
            return Ok(());
        }
    }
}

fn press_button<B: AudioBackend>(button: Button, app: &mut App<B>) -> bool {
    match button {
        Button::Play => app.resume(),
        Button::Pause => app.pause(),
        Button::Stop => app.stop(),
        Button::Exit => return true,
    }
    false
}

/// Handle a key press. Returns true when the app should exit.
pub fn handle_key_event<B, P, I>(
    key: KeyEvent,
    cx: &mut Context<'_, B, P, I>,
    state: &mut EventLoopState,
) -> bool
where
    B: AudioBackend,
    P: AccessProbe,
    I: MediaIndex + ?Sized,
{
    if cx.app.access == AccessState::Prompting {
        state.pending_gg = false;
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                startup::answer_prompt(cx.app, cx.gate, cx.index, true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                startup::answer_prompt(cx.app, cx.gate, cx.index, false)
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    let app = &mut *cx.app;
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            app.activate_selected(Instant::now());
        }
        KeyCode::Char('p') => {
            state.pending_gg = false;
            app.resume();
        }
        KeyCode::Char(' ') => {
            state.pending_gg = false;
            app.toggle_pause();
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            app.stop();
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            app.scrub(scrub_seconds(cx.settings));
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            app.scrub(-scrub_seconds(cx.settings));
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

fn scrub_seconds(settings: &config::Settings) -> i64 {
    settings.controls.scrub_seconds.min(i64::MAX as u64) as i64
}

/// Handle a mouse event against the last drawn layout. Returns true when the
/// app should exit.
pub fn handle_mouse_event<B, P, I>(
    mouse: MouseEvent,
    cx: &mut Context<'_, B, P, I>,
    state: &mut EventLoopState,
) -> bool
where
    B: AudioBackend,
    P: AccessProbe,
    I: MediaIndex + ?Sized,
{
    if cx.app.access == AccessState::Prompting {
        return false;
    }

    let areas = ui::areas(state.last_area);
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.pending_gg = false;
            if let Some(button) = ui::button_at(&areas, col, row) {
                return press_button(button, cx.app);
            }
            if let Some(i) = ui::list_index_at(cx.app, &areas, col, row) {
                cx.app.activate(i, Instant::now());
            } else if let Some(value) = ui::seek_value_at(cx.app, &areas, col, row) {
                cx.app.seek_from_user(value);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(value) = ui::seek_value_at(cx.app, &areas, col, row) {
                cx.app.seek_from_user(value);
            }
        }
        MouseEventKind::ScrollDown => cx.app.next(),
        MouseEventKind::ScrollUp => cx.app.prev(),
        _ => {}
    }
    false
}
