//! Chord construction and chord-symbol parsing
//!
//! Chords are built from a root note and a [`ChordType`] whose semitone offsets
//! are fixed data. [`parse_chord_symbol`] goes the other way, from a lead-sheet
//! symbol such as `Am7` or `Bbmaj7` back to a chord in a chosen octave.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::note::{notes_from_offsets, parse_note};
use super::scale::{get_scale_notes, ScaleType};
use crate::error::MuseError;

/// Chord types known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Minor7,
    Dominant7,
    Diminished7,
    #[serde(rename = "half-diminished7")]
    HalfDiminished7,
    Sus2,
    Sus4,
    Add9,
    Maj9,
    Min9,
}

impl ChordType {
    pub const ALL: [ChordType; 14] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::Dominant7,
        ChordType::Diminished7,
        ChordType::HalfDiminished7,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::Add9,
        ChordType::Maj9,
        ChordType::Min9,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Diminished => "diminished",
            ChordType::Augmented => "augmented",
            ChordType::Major7 => "major7",
            ChordType::Minor7 => "minor7",
            ChordType::Dominant7 => "dominant7",
            ChordType::Diminished7 => "diminished7",
            ChordType::HalfDiminished7 => "half-diminished7",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::Add9 => "add9",
            ChordType::Maj9 => "maj9",
            ChordType::Min9 => "min9",
        }
    }

    /// Semitone offsets from the root, lowest first
    ///
    /// - minor 3rd = +3, major 3rd = +4, perfect 5th = +7
    /// - minor 7th = +10, major 7th = +11, major 9th = +14
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordType::Major => &[0, 4, 7],
            ChordType::Minor => &[0, 3, 7],
            ChordType::Diminished => &[0, 3, 6],
            ChordType::Augmented => &[0, 4, 8],
            ChordType::Major7 => &[0, 4, 7, 11],
            ChordType::Minor7 => &[0, 3, 7, 10],
            ChordType::Dominant7 => &[0, 4, 7, 10],
            ChordType::Diminished7 => &[0, 3, 6, 9],
            ChordType::HalfDiminished7 => &[0, 3, 6, 10],
            ChordType::Sus2 => &[0, 2, 7],
            ChordType::Sus4 => &[0, 5, 7],
            ChordType::Add9 => &[0, 4, 7, 14],
            ChordType::Maj9 => &[0, 4, 7, 11, 14],
            ChordType::Min9 => &[0, 3, 7, 10, 14],
        }
    }

    /// Suffix appended to the root's pitch class in a chord symbol
    pub fn symbol_suffix(self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Diminished => "dim",
            ChordType::Augmented => "aug",
            ChordType::Major7 => "maj7",
            ChordType::Minor7 => "m7",
            ChordType::Dominant7 => "7",
            ChordType::Diminished7 => "dim7",
            ChordType::HalfDiminished7 => "m7b5",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::Add9 => "add9",
            ChordType::Maj9 => "maj9",
            ChordType::Min9 => "m9",
        }
    }

    /// Chord type for the quality part of a chord symbol (`"m7"` in `"Am7"`).
    ///
    /// Accepts the suffixes produced by [`ChordType::symbol_suffix`] plus the
    /// usual lead-sheet aliases.
    pub fn from_symbol_suffix(quality: &str) -> Result<Self, MuseError> {
        let chord_type = match quality {
            // Triads
            "" | "maj" | "M" => ChordType::Major,
            "m" | "min" | "-" => ChordType::Minor,
            "dim" | "°" => ChordType::Diminished,
            "aug" | "+" => ChordType::Augmented,

            // Sevenths
            "maj7" | "M7" => ChordType::Major7,
            "m7" | "min7" | "-7" => ChordType::Minor7,
            "7" => ChordType::Dominant7,
            "dim7" | "°7" => ChordType::Diminished7,
            "m7b5" | "ø" | "ø7" => ChordType::HalfDiminished7,

            // Suspended
            "sus2" => ChordType::Sus2,
            "sus4" | "sus" => ChordType::Sus4,

            // Extended
            "add9" => ChordType::Add9,
            "maj9" | "M9" => ChordType::Maj9,
            "m9" | "min9" => ChordType::Min9,

            _ => return Err(MuseError::UnknownChordType(quality.to_string())),
        };
        Ok(chord_type)
    }
}

impl FromStr for ChordType {
    type Err = MuseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ChordType::ALL
            .iter()
            .copied()
            .find(|chord| chord.as_str() == tag)
            .ok_or_else(|| MuseError::UnknownChordType(tag.to_string()))
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chord built on a root note
///
/// # Fields
/// - `root`: Root note in canonical spelling; always equal to `notes[0]`
/// - `chord_type`: Chord quality (serialized as `type`)
/// - `notes`: Component notes, lowest first
/// - `symbol`: Lead-sheet symbol (`"C#m7"`)
/// - `roman_numeral`: Scale-degree label when the chord came from a key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub root: String,
    #[serde(rename = "type")]
    pub chord_type: ChordType,
    pub notes: Vec<String>,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roman_numeral: Option<String>,
}

/// Notes of a chord on `root`.
///
/// # Examples
/// ```
/// use muselab::{get_chord_notes, ChordType};
///
/// assert_eq!(get_chord_notes("C4", ChordType::Major).unwrap(), vec!["C4", "E4", "G4"]);
/// assert_eq!(get_chord_notes("G3", ChordType::Dominant7).unwrap(), vec!["G3", "B3", "D4", "F4"]);
/// assert_eq!(get_chord_notes("Bb3", ChordType::Minor).unwrap(), vec!["Bb3", "Db4", "F4"]);
/// ```
pub fn get_chord_notes(root: &str, chord_type: ChordType) -> Result<Vec<String>, MuseError> {
    notes_from_offsets(root, chord_type.intervals())
}

/// Build a [`Chord`] record with its symbol and an optional Roman numeral
pub fn create_chord(
    root: &str,
    chord_type: ChordType,
    roman_numeral: Option<&str>,
) -> Result<Chord, MuseError> {
    let pitch_class = parse_note(root)?.pitch_class;
    let notes = get_chord_notes(root, chord_type)?;

    Ok(Chord {
        root: notes[0].clone(),
        chord_type,
        symbol: format!("{}{}", pitch_class, chord_type.symbol_suffix()),
        notes,
        roman_numeral: roman_numeral.map(str::to_string),
    })
}

/// Triad quality and Roman numeral for each degree of a major key
const DIATONIC_DEGREES: [(ChordType, &str); 7] = [
    (ChordType::Major, "I"),
    (ChordType::Minor, "ii"),
    (ChordType::Minor, "iii"),
    (ChordType::Major, "IV"),
    (ChordType::Major, "V"),
    (ChordType::Minor, "vi"),
    (ChordType::Diminished, "vii°"),
];

/// The seven diatonic triads of the major key on `root`.
///
/// # Examples
/// ```
/// use muselab::get_diatonic_chords;
///
/// let chords = get_diatonic_chords("C4").unwrap();
/// let symbols: Vec<&str> = chords.iter().map(|c| c.symbol.as_str()).collect();
/// assert_eq!(symbols, vec!["C", "Dm", "Em", "F", "G", "Am", "Bdim"]);
/// assert_eq!(chords[4].roman_numeral.as_deref(), Some("V"));
/// ```
pub fn get_diatonic_chords(root: &str) -> Result<Vec<Chord>, MuseError> {
    get_scale_notes(root, ScaleType::Major)?
        .iter()
        .zip(DIATONIC_DEGREES)
        .map(|(note, (chord_type, numeral))| create_chord(note, chord_type, Some(numeral)))
        .collect()
}

/// Parse a chord symbol (`C`, `Am`, `G7`, `Bbmaj7`, `F#m7b5`) into a chord
/// whose root sits in `octave`.
///
/// # Examples
/// ```
/// use muselab::{parse_chord_symbol, ChordType};
///
/// let chord = parse_chord_symbol("Dm7", 3).unwrap();
/// assert_eq!(chord.chord_type, ChordType::Minor7);
/// assert_eq!(chord.notes, vec!["D3", "F3", "A3", "C4"]);
///
/// // F# major: F#3, A#3, C#4
/// assert_eq!(parse_chord_symbol("F#", 3).unwrap().notes, vec!["F#3", "A#3", "C#4"]);
///
/// assert!(parse_chord_symbol("C13", 3).is_err());
/// ```
pub fn parse_chord_symbol(symbol: &str, octave: u32) -> Result<Chord, MuseError> {
    let invalid = || MuseError::InvalidFormat(symbol.to_string());

    // Root letter, then an optional accidental
    let letter = symbol.chars().next().ok_or_else(invalid)?;
    if !matches!(letter, 'A'..='G') {
        return Err(invalid());
    }
    let root_len = match symbol[1..].chars().next() {
        Some('#') | Some('b') => 2,
        _ => 1,
    };
    let (root_name, quality) = symbol.split_at(root_len);

    let chord_type = ChordType::from_symbol_suffix(quality)?;
    create_chord(&format!("{}{}", root_name, octave), chord_type, None)
}

/// Every chord type, in table order
pub fn all_chord_types() -> &'static [ChordType] {
    &ChordType::ALL
}
