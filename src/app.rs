//! Application module: exposes the screen model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the song list, selection,
//! cover, seek bar and playback state.

mod model;

pub use model::*;
