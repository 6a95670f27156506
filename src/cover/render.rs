use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use super::Cover;

const PLACEHOLDER: [&str; 7] = [
    "      ▄▄▄▄▄▄▄█",
    "      █      █",
    "      █      █",
    "      █      █",
    "  ▄▄▄▄█  ▄▄▄▄█",
    " ██████ ██████",
    "  ▀▀▀▀   ▀▀▀▀ ",
];

/// Draws a [`Cover`] into its panel. Art uses upper half blocks, so every
/// cell shows two vertically stacked pixels.
pub struct CoverView<'a> {
    cover: &'a Cover,
}

impl<'a> CoverView<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self { cover }
    }
}

impl Widget for CoverView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        match self.cover {
            Cover::Art(art) => {
                let fitted = art.fitted(u32::from(area.width), u32::from(area.height) * 2);
                let cols = fitted.width() as u16;
                let rows = fitted.height().div_ceil(2) as u16;
                let x0 = area.x + (area.width - cols) / 2;
                let y0 = area.y + (area.height - rows) / 2;

                for row in 0..rows {
                    for col in 0..cols {
                        let px = u32::from(col);
                        let top = fitted.get_pixel(px, u32::from(row) * 2).0;
                        let bottom_y = u32::from(row) * 2 + 1;
                        let bottom = if bottom_y < fitted.height() {
                            fitted.get_pixel(px, bottom_y).0
                        } else {
                            top
                        };
                        if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                            cell.set_char('▀')
                                .set_fg(Color::Rgb(top[0], top[1], top[2]))
                                .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                        }
                    }
                }
            }
            Cover::Placeholder => {
                let height = (PLACEHOLDER.len() as u16).min(area.height);
                let y0 = area.y + (area.height - height) / 2;
                for (i, line) in PLACEHOLDER.iter().take(height as usize).enumerate() {
                    let width = (line.chars().count() as u16).min(area.width);
                    let x0 = area.x + (area.width - width) / 2;
                    buf.set_stringn(
                        x0,
                        y0 + i as u16,
                        line,
                        width as usize,
                        Style::default().fg(Color::DarkGray),
                    );
                }
            }
        }
    }
}
