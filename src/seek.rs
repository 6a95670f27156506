//! Seek bar model and the periodic position poll that feeds it.

mod bar;
mod poll;

pub use bar::{FALLBACK_MAX, SeekBar, SeekOrigin};
pub use poll::PositionPoll;
