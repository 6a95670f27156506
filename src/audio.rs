//! Playback: the player abstraction, its `rodio` backend and the controller
//! that owns the single active handle.

mod controller;
mod player;
mod sink;
mod types;

pub use controller::{ControllerState, PlaybackController};
pub use player::{AudioBackend, Player};
pub use sink::RodioBackend;
pub use types::{AudioAttributes, ContentType, PlaybackError, Usage};

#[cfg(test)]
pub(crate) mod testing;
