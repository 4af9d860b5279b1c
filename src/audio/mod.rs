//! # Audio Module
//!
//! Schedule notes, chords, chord progressions and scales on an injected tone
//! backend.
//!
//! ## Purpose
//! This module does the timing and envelope math for playback and hands the
//! result to a [`ToneBackend`]. It never reaches for a global audio device:
//! the host builds one backend and passes it to [`AudioEngine::new`], which
//! also makes the engine testable without sound hardware.
//!
//! ## Sub-modules
//! - `types` - AudioConfig, Adsr, Waveform, Preset, ChordProgression, ToneRequest
//! - `timing` - Tempo arithmetic (chord durations and start offsets)
//! - `envelope` - ADSR gain automation points and their evaluation
//! - `backend` - The `ToneBackend` / `Voice` capability traits
//! - `engine` - `AudioEngine` and the `Playback` handle
//! - `render` - `OfflineBackend`, renders voices to samples or WAV
//!
//! ## Timing System
//!
//! ### Beats
//! - One beat lasts `60 / tempo` seconds
//! - Chord `i` of a progression starts at `i * beats_per_chord * 60 / tempo`
//! - Chords are back to back: no gap, no overlap
//! - Scale notes last exactly one beat each
//!
//! ### Envelope
//! - Defaults: attack 0.02s, decay 0.1s, sustain 0.7, release 0.3s, triangle wave
//! - Each oscillator runs 0.1s past its envelope so the release is not clipped
//!
//! ## Volume
//! - Chords: `master_volume / sqrt(voices)` per voice
//! - Progressions: the same, using the largest chord in the progression
//!
//! ## Example
//! ```rust
//! use muselab::audio::{calculate_chord_duration, calculate_chord_start_time};
//!
//! // 120 BPM, 2 beats per chord
//! assert_eq!(calculate_chord_duration(120.0, 2), 1.0);
//! assert_eq!(calculate_chord_start_time(120.0, 2, 3), 3.0);
//! ```

mod backend;
mod engine;
mod envelope;
mod render;
mod timing;
mod types;


pub use backend::{ToneBackend, Voice};
pub use engine::{AudioEngine, Playback};
pub use envelope::{gain_at, STOP_TAIL};
pub use render::{OfflineBackend, OfflineVoice};
pub use timing::{beat_duration, calculate_chord_duration, calculate_chord_start_time};
pub use types::{
    Adsr, AudioConfig, BackendState, ChordProgression, GainPoint, Preset, Ramp, ToneRequest,
    Waveform,
};
