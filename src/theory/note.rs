//! Note parsing and pitch conversion
//!
//! Converts between note text (`C#4`, `Bb3`), MIDI numbers and equal-temperament
//! frequencies.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::error::MuseError;

/// Pitch-class names using sharps, indexed by semitone above C
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch-class names using flats, indexed by semitone above C
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Concert pitch reference (A4)
pub const A4_FREQUENCY: f64 = 440.0;
pub const A4_MIDI: i32 = 69;

/// Note text split into its pitch class and octave.
///
/// The pitch class is normalized to an upper-case letter followed by the
/// accidental as written (`"c#4"` → `"C#"`). It is not checked against the
/// pitch-class tables, so `"E#4"` parses even though it has no MIDI number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedNote {
    pub pitch_class: String,
    pub octave: u32,
}

/// Which accidental to use when turning a MIDI number back into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// Parse note text of the form `<A-G>[#|b]<octave>`.
///
/// The letter is case-insensitive; the accidental is not (`b` means flat,
/// `B` would be a second letter and is rejected).
///
/// # Examples
/// ```
/// use muselab::parse_note;
///
/// let note = parse_note("f#5").unwrap();
/// assert_eq!(note.pitch_class, "F#");
/// assert_eq!(note.octave, 5);
///
/// assert!(parse_note("H2").is_err());
/// assert!(parse_note("C").is_err());
/// ```
pub fn parse_note(text: &str) -> Result<ParsedNote, MuseError> {
    let invalid = || MuseError::InvalidFormat(text.to_string());

    let letter = text.chars().next().ok_or_else(invalid)?.to_ascii_uppercase();
    if !matches!(letter, 'A'..='G') {
        return Err(invalid());
    }

    // Letter is ASCII, so the remainder starts at byte 1
    let rest = &text[1..];
    let (accidental, digits) = if let Some(digits) = rest.strip_prefix('#') {
        ("#", digits)
    } else if let Some(digits) = rest.strip_prefix('b') {
        ("b", digits)
    } else {
        ("", rest)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let octave: u32 = digits.parse().map_err(|_| invalid())?;

    Ok(ParsedNote {
        pitch_class: format!("{}{}", letter, accidental),
        octave,
    })
}

/// Semitone index above C for a pitch-class name, accepting both spellings
fn pitch_class_index(name: &str) -> Option<i32> {
    NOTE_NAMES
        .iter()
        .position(|n| *n == name)
        .or_else(|| NOTE_NAMES_FLAT.iter().position(|n| *n == name))
        .map(|i| i as i32)
}

/// A pitch. Equality, ordering and hashing use the MIDI number only, so
/// enharmonic spellings compare equal (`C#4 == Db4`).
///
/// # Examples
/// ```
/// use muselab::theory::Note;
///
/// let c_sharp: Note = "C#4".parse().unwrap();
/// let d_flat: Note = "Db4".parse().unwrap();
/// assert_eq!(c_sharp, d_flat);
/// assert_eq!(c_sharp.midi(), 61);
/// assert_eq!(d_flat.to_string(), "Db4");
/// assert_eq!(d_flat.transpose(2).to_string(), "Eb4");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Note {
    midi: i32,
    spelling: Spelling,
}

impl Note {
    /// Note for a MIDI number, spelled with sharps
    pub fn from_midi(midi: i32) -> Self {
        Self {
            midi,
            spelling: Spelling::Sharps,
        }
    }

    pub fn with_spelling(self, spelling: Spelling) -> Self {
        Self { spelling, ..self }
    }

    pub fn midi(&self) -> i32 {
        self.midi
    }

    pub fn spelling(&self) -> Spelling {
        self.spelling
    }

    /// Octave number (C4 = middle C). Negative below MIDI 12.
    pub fn octave(&self) -> i32 {
        self.midi.div_euclid(12) - 1
    }

    /// Semitone index above C (0-11)
    pub fn pitch_class(&self) -> usize {
        self.midi.rem_euclid(12) as usize
    }

    pub fn pitch_class_name(&self) -> &'static str {
        match self.spelling {
            Spelling::Sharps => NOTE_NAMES[self.pitch_class()],
            Spelling::Flats => NOTE_NAMES_FLAT[self.pitch_class()],
        }
    }

    /// Equal-temperament frequency in Hz: `440 * 2^((midi - 69) / 12)`
    pub fn frequency(&self) -> f64 {
        A4_FREQUENCY * 2.0_f64.powf((self.midi - A4_MIDI) as f64 / 12.0)
    }

    /// Move by a number of semitones, keeping the spelling preference.
    ///
    /// The MIDI number is not clamped: going below MIDI 0 or above 127 yields
    /// notes no instrument can play, and below MIDI 12 the text form carries a
    /// negative octave that [`parse_note`] will not accept back.
    pub fn transpose(self, semitones: i32) -> Self {
        Self {
            midi: self.midi.saturating_add(semitones),
            ..self
        }
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.midi == other.midi
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.midi.hash(state);
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi.cmp(&other.midi)
    }
}

impl FromStr for Note {
    type Err = MuseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parsed = parse_note(text)?;
        let index = pitch_class_index(&parsed.pitch_class)
            .ok_or_else(|| MuseError::InvalidFormat(text.to_string()))?;

        // (octave + 1) * 12 + index, guarding absurd octave digits
        let midi = i32::try_from(parsed.octave)
            .ok()
            .and_then(|octave| octave.checked_add(1))
            .and_then(|octave| octave.checked_mul(12))
            .and_then(|base| base.checked_add(index))
            .ok_or_else(|| MuseError::InvalidFormat(text.to_string()))?;

        let spelling = if parsed.pitch_class.ends_with('b') {
            Spelling::Flats
        } else {
            Spelling::Sharps
        };

        Ok(Self { midi, spelling })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class_name(), self.octave())
    }
}

/// MIDI number of a note (`C4` = 60). Sharp and flat spellings are both accepted.
pub fn note_to_midi(note: &str) -> Result<i32, MuseError> {
    Ok(note.parse::<Note>()?.midi())
}

/// Note text for a MIDI number. Never fails; out-of-range input produces
/// out-of-range octaves.
///
/// # Examples
/// ```
/// use muselab::midi_to_note;
///
/// assert_eq!(midi_to_note(60, false), "C4");
/// assert_eq!(midi_to_note(70, false), "A#4");
/// assert_eq!(midi_to_note(70, true), "Bb4");
/// ```
pub fn midi_to_note(midi: i32, prefer_flats: bool) -> String {
    let spelling = if prefer_flats {
        Spelling::Flats
    } else {
        Spelling::Sharps
    };
    Note::from_midi(midi).with_spelling(spelling).to_string()
}

/// Frequency in Hz of a note. `A4` is exactly 440.
pub fn note_to_frequency(note: &str) -> Result<f64, MuseError> {
    Ok(note.parse::<Note>()?.frequency())
}

/// Nearest note to a frequency (rounds to the closest semitone).
///
/// This is a pitch-detection helper, not an exact inverse of
/// [`note_to_frequency`].
pub fn frequency_to_note(frequency: f64) -> Result<String, MuseError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(MuseError::InvalidFrequency(frequency));
    }
    let midi = (A4_MIDI as f64 + 12.0 * (frequency / A4_FREQUENCY).log2()).round();
    Ok(midi_to_note(midi as i32, false))
}

/// Transpose note text by a number of semitones.
///
/// Flat-spelled input comes back spelled with flats, everything else with
/// sharps, so transposing by 0 returns canonical input unchanged.
pub fn transpose_note(note: &str, semitones: i32) -> Result<String, MuseError> {
    Ok(note.parse::<Note>()?.transpose(semitones).to_string())
}

/// True when the text has the shape of a note (see [`parse_note`])
pub fn is_valid_note(text: &str) -> bool {
    parse_note(text).is_ok()
}

/// Spell out the notes at fixed semitone offsets above a root
pub(crate) fn notes_from_offsets(root: &str, offsets: &[i32]) -> Result<Vec<String>, MuseError> {
    let root: Note = root.parse()?;
    Ok(offsets
        .iter()
        .map(|offset| root.transpose(*offset).to_string())
        .collect())
}
