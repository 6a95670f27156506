use tracing::{error, info};

use crate::access::{AccessProbe, AccessState, PermissionGate};
use crate::app::App;
use crate::audio::AudioBackend;
use crate::library::{MediaIndex, list_music};

/// Run the access check on launch and fill the list when it passes.
pub fn open_library<B, P, I>(app: &mut App<B>, gate: &mut PermissionGate<P>, index: &I)
where
    B: AudioBackend,
    P: AccessProbe,
    I: MediaIndex + ?Sized,
{
    let state = gate.ensure();
    settle(app, state, index);
}

/// Deliver the prompt answer to the gate and act on the outcome.
pub fn answer_prompt<B, P, I>(
    app: &mut App<B>,
    gate: &mut PermissionGate<P>,
    index: &I,
    accept: bool,
) where
    B: AudioBackend,
    P: AccessProbe,
    I: MediaIndex + ?Sized,
{
    let state = gate.respond(accept);
    settle(app, state, index);
}

fn settle<B, I>(app: &mut App<B>, state: AccessState, index: &I)
where
    B: AudioBackend,
    I: MediaIndex + ?Sized,
{
    app.set_access(state);
    if state == AccessState::Granted {
        populate(app, index);
    }
}

/// Query the index and show the songs. A failing query leaves the list empty.
pub fn populate<B, I>(app: &mut App<B>, index: &I)
where
    B: AudioBackend,
    I: MediaIndex + ?Sized,
{
    match list_music(index) {
        Ok(songs) => {
            info!(count = songs.len(), "library loaded");
            app.set_songs(songs);
        }
        Err(e) => {
            error!(error = %e, "listing music failed");
            app.set_songs(Vec::new());
            app.status = Some(format!("Could not list music: {e}"));
        }
    }
}
