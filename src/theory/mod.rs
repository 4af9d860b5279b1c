//! # Music Theory Module
//!
//! Pure functions over notes, intervals, chords and scales.
//!
//! ## Sub-modules
//! - `note` - Note text parsing, MIDI numbers, frequencies, transposition
//! - `interval` - Interval naming between two notes
//! - `chord` - Chord types, chord records, diatonic chords, chord-symbol parsing
//! - `scale` - Scale types and scale construction
//!
//! ## Pitch System
//!
//! ### MIDI Numbers
//! - Middle C (C4) = 60
//! - A4 = 69 = 440 Hz
//! - `midi = (octave + 1) * 12 + pitch_class`
//!
//! ### Frequencies
//! - Equal temperament: `f = 440 * 2^((midi - 69) / 12)`
//! - Every 12 semitones doubles the frequency
//!
//! ### Spelling
//! - Input accepts sharps and flats (`C#4` and `Db4` are the same pitch)
//! - Output uses sharps unless flats are requested, or the input being
//!   transposed was itself spelled with a flat
//!
//! ## Example
//! ```rust
//! use muselab::theory::{create_chord, get_scale_notes, ChordType, ScaleType};
//!
//! let chord = create_chord("A3", ChordType::Minor7, Some("vi")).unwrap();
//! assert_eq!(chord.symbol, "Am7");
//! assert_eq!(chord.notes, vec!["A3", "C4", "E4", "G4"]);
//!
//! let scale = get_scale_notes("C4", ScaleType::Major).unwrap();
//! assert_eq!(scale, vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]);
//! ```
//!
//! All functions are free of shared state and safe to call from anywhere.

mod chord;
mod interval;
mod note;
mod scale;


pub use chord::{
    all_chord_types, create_chord, get_chord_notes, get_diatonic_chords, parse_chord_symbol,
    Chord, ChordType,
};
pub use interval::{all_interval_names, get_interval, Interval, IntervalName};
pub use note::{
    frequency_to_note, is_valid_note, midi_to_note, note_to_frequency, note_to_midi, parse_note,
    transpose_note, Note, ParsedNote, Spelling, A4_FREQUENCY, A4_MIDI,
};
pub use scale::{all_scale_types, get_scale_notes, ScaleType};
