//! # Error Types
//!
//! This module defines all error types for the muselab core.
//!
//! Theory and progress errors are programmer errors (bad note text, unknown tags,
//! corrupt blobs) and are returned synchronously. Backend errors are produced by
//! [`ToneBackend`](crate::audio::ToneBackend) implementations; the audio engine
//! absorbs them and plays nothing rather than failing the caller.
//!
//! ## Usage
//! ```rust
//! use muselab::{note_to_midi, MuseError};
//!
//! match note_to_midi("H4") {
//!     Ok(midi) => println!("MIDI {}", midi),
//!     Err(MuseError::InvalidFormat(text)) => eprintln!("bad note: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MuseError {
    /// Malformed note text, or a pitch class that has no MIDI index (`E#`, `Cb`).
    ///
    /// # Example
    /// ```
    /// # use muselab::MuseError;
    /// let err = MuseError::InvalidFormat("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid note format: H4");
    /// ```
    #[error("Invalid note format: {0}")]
    InvalidFormat(String),

    /// A chord-type tag or chord-symbol quality that is not in the chord table.
    ///
    /// # Example
    /// ```
    /// # use muselab::MuseError;
    /// let err = MuseError::UnknownChordType("power".to_string());
    /// assert_eq!(err.to_string(), "Unknown chord type: power");
    /// ```
    #[error("Unknown chord type: {0}")]
    UnknownChordType(String),

    /// A scale-type tag that is not in the scale table.
    #[error("Unknown scale type: {0}")]
    UnknownScaleType(String),

    /// A frequency that cannot be mapped to a pitch (zero, negative, NaN, infinite).
    #[error("Invalid frequency: {0} Hz")]
    InvalidFrequency(f64),

    /// A tempo that is not a positive, finite number of beats per minute.
    #[error("Invalid tempo: {0} BPM")]
    InvalidTempo(f64),

    /// A note length that is NaN or infinite.
    #[error("Invalid duration: {0} seconds")]
    InvalidDuration(f64),

    /// A persisted progress blob that is not valid progress JSON.
    ///
    /// # Example
    /// ```
    /// # use muselab::MuseError;
    /// let err = MuseError::InvalidProgressData("expected value at line 1 column 1".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid progress data format: expected value at line 1 column 1"
    /// );
    /// ```
    #[error("Invalid progress data format: {0}")]
    InvalidProgressData(String),

    /// The tone backend is closed or refused to resume.
    #[error("Audio backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Invalid YAML configuration or an out-of-range configured value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The key-value store rejected a write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Offline rendering or WAV output failed.
    #[error("Render error: {0}")]
    Render(String),
}
