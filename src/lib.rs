//! # muselab
//!
//! Music theory, playback scheduling and learning progress for ear-training and
//! theory practice tools.
//!
//! - [`theory`] - Notes, MIDI numbers, frequencies, intervals, chords, scales
//! - [`audio`] - Tempo math and scheduling of notes and chords on a tone backend
//! - [`progress`] - Study streaks, completion, accuracy and vocabulary review
//! - [`config`] - Optional YAML settings
//!
//! ## Example
//! ```rust
//! use muselab::{create_chord, get_scale_notes, ChordType, ScaleType};
//!
//! let chord = create_chord("C4", ChordType::Major, Some("I")).unwrap();
//! assert_eq!(chord.notes, vec!["C4", "E4", "G4"]);
//! assert_eq!(chord.symbol, "C");
//!
//! let scale = get_scale_notes("C4", ScaleType::Major).unwrap();
//! assert_eq!(scale, vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]);
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod progress;
pub mod theory;

pub use audio::{
    calculate_chord_duration, calculate_chord_start_time, AudioConfig, AudioEngine,
    ChordProgression, OfflineBackend, Playback, ToneBackend,
};
pub use config::EngineConfig;
pub use error::*;
pub use progress::LearningProgress;
pub use theory::*;
