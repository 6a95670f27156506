//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus
//! the hit-testing the event loop uses to turn mouse clicks into actions.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::access::AccessState;
use crate::app::{App, PlaybackState};
use crate::audio::AudioBackend;
use crate::config::{ControlsSettings, UiSettings};
use crate::cover::CoverView;

/// Clickable transport buttons in the controls box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Play,
    Pause,
    Stop,
    Exit,
}

const BUTTONS: [(Button, &str); 4] = [
    (Button::Play, "[ play ]"),
    (Button::Pause, "[ pause ]"),
    (Button::Stop, "[ stop ]"),
    (Button::Exit, "[ exit ]"),
];
const BUTTON_GAP: u16 = 2;

/// Screen regions, shared by drawing and mouse hit-testing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub status: Rect,
    pub list: Rect,
    pub cover: Rect,
    pub seek: Rect,
    pub controls: Rect,
}

/// Split the frame into the screen regions.
pub fn areas(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);

    Areas {
        header: rows[0],
        status: rows[1],
        list: main[0],
        cover: main[1],
        seek: rows[3],
        controls: rows[4],
    }
}

fn bordered_inner(r: Rect) -> Rect {
    r.inner(Margin::new(1, 1))
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Center the cursor in the list when possible; returns the visible
/// `[start, end)` range.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    height = height.min(r.height.saturating_sub(2)).max(5).min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Horizontal spans of the transport buttons on the first controls row.
fn button_rects(controls: Rect) -> Vec<(Button, Rect)> {
    let inner = controls.inner(Margin::new(2, 1));
    let mut x = inner.x;
    let mut out = Vec::with_capacity(BUTTONS.len());
    for (button, label) in BUTTONS {
        let width = label.chars().count() as u16;
        out.push((button, Rect::new(x, inner.y, width, 1).intersection(inner)));
        x = x.saturating_add(width + BUTTON_GAP);
    }
    out
}

/// The button under a click, if any.
pub fn button_at(areas: &Areas, column: u16, row: u16) -> Option<Button> {
    button_rects(areas.controls)
        .into_iter()
        .find(|(_, r)| r.contains(Position::new(column, row)))
        .map(|(b, _)| b)
}

/// The song index under a click in the list, if any.
pub fn list_index_at<B: AudioBackend>(
    app: &App<B>,
    areas: &Areas,
    column: u16,
    row: u16,
) -> Option<usize> {
    let inner = bordered_inner(areas.list);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    let (start, end) = visible_window(app.songs.len(), inner.height as usize, app.selected);
    let idx = start + (row - inner.y) as usize;
    (idx < end).then_some(idx)
}

/// The seek bar value under a click or drag, if it lands on the bar.
pub fn seek_value_at<B: AudioBackend>(
    app: &App<B>,
    areas: &Areas,
    column: u16,
    row: u16,
) -> Option<u64> {
    let inner = bordered_inner(areas.seek);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    Some(app.seek.value_at(column - inner.x, inner.width))
}

fn status_text<B: AudioBackend>(app: &App<B>) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = match app.playback_state() {
        PlaybackState::Idle => "Idle",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    };
    parts.push(state.to_string());

    if let Some(song) = app.now_playing() {
        if song.artist.trim().is_empty() {
            parts.push(format!("Song: {}", song.title));
        } else {
            parts.push(format!("Song: {} - {}", song.title, song.artist));
        }
    }

    if app.access == AccessState::Prompting {
        parts.push("Waiting for library access".to_string());
    }
    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.push(format!("Dir: {}", app.library_root.display()));
    parts.join(" • ")
}

fn controls_lines(scrub_seconds: u64) -> Vec<Line<'static>> {
    let mut buttons: Vec<Span> = Vec::new();
    for (i, (_, label)) in BUTTONS.iter().enumerate() {
        if i > 0 {
            buttons.push(Span::raw(" ".repeat(BUTTON_GAP as usize)));
        }
        buttons.push(Span::raw(*label).bold());
    }

    let hints = format!(
        "[j/k] up/down | [gg/G] top/bottom | [enter] play selected | [p] play | [space] pause | [s] stop | [H/L] scrub -/+{}s | [q] exit",
        scrub_seconds
    );
    vec![Line::from(buttons), Line::from(hints).dim()]
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<B: AudioBackend>(
    frame: &mut Frame,
    app: &App<B>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let areas = areas(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" aria ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, areas.header);

    // Status box
    let status_par = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, areas.status);

    // Song list
    {
        let total = app.songs.len();
        let list_height = bordered_inner(areas.list).height as usize;
        let (start, end) = visible_window(total, list_height, app.selected);

        let visible_items: Vec<ListItem> = app.songs[start..end]
            .iter()
            .map(|s| ListItem::new(s.title.as_str()))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" songs "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, areas.list, &mut state);
    }

    // Cover
    let cover_block = Block::default().borders(Borders::ALL).title(" cover ");
    let cover_inner = cover_block.inner(areas.cover);
    frame.render_widget(cover_block, areas.cover);
    frame.render_widget(CoverView::new(&app.cover), cover_inner);

    // Seek bar
    let progress = Duration::from_millis(app.seek.progress());
    let total = Duration::from_millis(app.seek.max());
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" seek "))
        .ratio(app.seek.ratio())
        .label(format!("{} / {}", format_mmss(progress), format_mmss(total)));
    frame.render_widget(gauge, areas.seek);

    // Controls
    let footer = Paragraph::new(controls_lines(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, areas.controls);

    // Access prompt overlays everything until answered.
    if app.access == AccessState::Prompting {
        let popup_area = centered_rect_sized(64, 7, frame.area());
        frame.render_widget(Clear, popup_area);
        let text = format!(
            "aria cannot read the music library at\n{}\n\nAllow access and try again? [y]es / [n]o",
            app.library_root.display()
        );
        let popup = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" library access "))
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }
}
