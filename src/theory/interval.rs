//! Interval naming between two notes

use serde::Serialize;

use super::note::Note;
use crate::error::MuseError;

/// Named intervals from unison to octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalName {
    Unison,
    Minor2nd,
    Major2nd,
    Minor3rd,
    Major3rd,
    Perfect4th,
    Tritone,
    Perfect5th,
    Minor6th,
    Major6th,
    Minor7th,
    Major7th,
    Octave,
}

impl IntervalName {
    pub const ALL: [IntervalName; 13] = [
        IntervalName::Unison,
        IntervalName::Minor2nd,
        IntervalName::Major2nd,
        IntervalName::Minor3rd,
        IntervalName::Major3rd,
        IntervalName::Perfect4th,
        IntervalName::Tritone,
        IntervalName::Perfect5th,
        IntervalName::Minor6th,
        IntervalName::Major6th,
        IntervalName::Minor7th,
        IntervalName::Major7th,
        IntervalName::Octave,
    ];

    pub fn semitones(self) -> u32 {
        match self {
            IntervalName::Unison => 0,
            IntervalName::Minor2nd => 1,
            IntervalName::Major2nd => 2,
            IntervalName::Minor3rd => 3,
            IntervalName::Major3rd => 4,
            IntervalName::Perfect4th => 5,
            IntervalName::Tritone => 6,
            IntervalName::Perfect5th => 7,
            IntervalName::Minor6th => 8,
            IntervalName::Major6th => 9,
            IntervalName::Minor7th => 10,
            IntervalName::Major7th => 11,
            IntervalName::Octave => 12,
        }
    }

    /// Tag used in persisted data and UI lookups (`"minor3rd"`)
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalName::Unison => "unison",
            IntervalName::Minor2nd => "minor2nd",
            IntervalName::Major2nd => "major2nd",
            IntervalName::Minor3rd => "minor3rd",
            IntervalName::Major3rd => "major3rd",
            IntervalName::Perfect4th => "perfect4th",
            IntervalName::Tritone => "tritone",
            IntervalName::Perfect5th => "perfect5th",
            IntervalName::Minor6th => "minor6th",
            IntervalName::Major6th => "major6th",
            IntervalName::Minor7th => "minor7th",
            IntervalName::Major7th => "major7th",
            IntervalName::Octave => "octave",
        }
    }

    /// Human-readable name (`"Minor 3rd"`)
    pub fn display_name(self) -> &'static str {
        match self {
            IntervalName::Unison => "Unison",
            IntervalName::Minor2nd => "Minor 2nd",
            IntervalName::Major2nd => "Major 2nd",
            IntervalName::Minor3rd => "Minor 3rd",
            IntervalName::Major3rd => "Major 3rd",
            IntervalName::Perfect4th => "Perfect 4th",
            IntervalName::Tritone => "Tritone",
            IntervalName::Perfect5th => "Perfect 5th",
            IntervalName::Minor6th => "Minor 6th",
            IntervalName::Major6th => "Major 6th",
            IntervalName::Minor7th => "Minor 7th",
            IntervalName::Major7th => "Major 7th",
            IntervalName::Octave => "Octave",
        }
    }

    /// Name for an octave-reduced distance. 12 and above fold back into 0-11,
    /// so this never yields `Octave`.
    pub fn reduced(semitones: u32) -> Self {
        match semitones % 12 {
            0 => IntervalName::Unison,
            1 => IntervalName::Minor2nd,
            2 => IntervalName::Major2nd,
            3 => IntervalName::Minor3rd,
            4 => IntervalName::Major3rd,
            5 => IntervalName::Perfect4th,
            6 => IntervalName::Tritone,
            7 => IntervalName::Perfect5th,
            8 => IntervalName::Minor6th,
            9 => IntervalName::Major6th,
            10 => IntervalName::Minor7th,
            11 => IntervalName::Major7th,
            _ => unreachable!(),
        }
    }
}

/// Interval between two notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub name: IntervalName,
    pub semitones: u32,
}

impl Interval {
    pub fn display_name(&self) -> &'static str {
        self.name.display_name()
    }
}

/// Octave-reduced interval between two notes.
///
/// Order does not matter. The distance is taken before reducing, so a compound
/// interval keeps its simple name (a 10th is a major 3rd) while an inverted
/// pair does not (E4 up to C5 is a minor 6th).
///
/// # Examples
/// ```
/// use muselab::{get_interval, IntervalName};
///
/// let fifth = get_interval("C4", "G4").unwrap();
/// assert_eq!(fifth.semitones, 7);
/// assert_eq!(fifth.name, IntervalName::Perfect5th);
///
/// // Compound intervals are reduced: C4 to E5 is a major 3rd
/// assert_eq!(get_interval("E5", "C4").unwrap().name, IntervalName::Major3rd);
/// ```
pub fn get_interval(first: &str, second: &str) -> Result<Interval, MuseError> {
    let first: Note = first.parse()?;
    let second: Note = second.parse()?;
    let semitones = (second.midi() - first.midi()).unsigned_abs() % 12;

    Ok(Interval {
        name: IntervalName::reduced(semitones),
        semitones,
    })
}

/// Every interval name, unison through octave
pub fn all_interval_names() -> &'static [IntervalName] {
    &IntervalName::ALL
}
