//! Tone backend capability
//!
//! The audio engine never creates sound itself. The host builds one backend at
//! startup (a browser audio context binding, a native output stream, or the
//! [`OfflineBackend`](super::OfflineBackend)) and hands it to
//! [`AudioEngine::new`](super::AudioEngine::new).

use std::future::Future;

use super::types::{BackendState, ToneRequest};
use crate::error::MuseError;

/// Handle to one sounding oscillator
pub trait Voice {
    /// Silence the voice now. Stopping a voice that already finished or was
    /// already stopped does nothing.
    fn stop(&self);
}

/// Something that can turn [`ToneRequest`]s into sound
pub trait ToneBackend {
    type Voice: Voice;

    fn state(&self) -> BackendState;

    /// Move a suspended backend to [`BackendState::Running`].
    ///
    /// May wait, e.g. for a platform to allow audio after a user gesture.
    fn resume(&self) -> impl Future<Output = Result<(), MuseError>>;

    /// Backend clock in seconds; request times are on this clock
    fn current_time(&self) -> f64;

    /// Schedule one voice. The backend owns the timing from here on.
    fn start_voice(&self, request: ToneRequest) -> Result<Self::Voice, MuseError>;

    /// Stop every voice and release the output
    fn close(&self);
}
