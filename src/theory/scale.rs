//! Scale construction from a root note

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::note::notes_from_offsets;
use crate::error::MuseError;

/// Scale types known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    PentatonicMajor,
    PentatonicMinor,
    Blues,
}

impl ScaleType {
    pub const ALL: [ScaleType; 12] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Locrian,
        ScaleType::PentatonicMajor,
        ScaleType::PentatonicMinor,
        ScaleType::Blues,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural-minor",
            ScaleType::HarmonicMinor => "harmonic-minor",
            ScaleType::MelodicMinor => "melodic-minor",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::Locrian => "locrian",
            ScaleType::PentatonicMajor => "pentatonic-major",
            ScaleType::PentatonicMinor => "pentatonic-minor",
            ScaleType::Blues => "blues",
        }
    }

    /// Semitone offsets from the root, in scale order
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleType::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleType::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            ScaleType::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ScaleType::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleType::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            ScaleType::PentatonicMajor => &[0, 2, 4, 7, 9],
            ScaleType::PentatonicMinor => &[0, 3, 5, 7, 10],
            ScaleType::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }
}

impl FromStr for ScaleType {
    type Err = MuseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ScaleType::ALL
            .iter()
            .copied()
            .find(|scale| scale.as_str() == tag)
            .ok_or_else(|| MuseError::UnknownScaleType(tag.to_string()))
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notes of a scale starting on `root`, ascending.
///
/// # Examples
/// ```
/// use muselab::{get_scale_notes, ScaleType};
///
/// let notes = get_scale_notes("A3", ScaleType::PentatonicMinor).unwrap();
/// assert_eq!(notes, vec!["A3", "C4", "D4", "E4", "G4"]);
///
/// // Unknown tags are rejected when parsed
/// assert!("bebop".parse::<ScaleType>().is_err());
/// ```
pub fn get_scale_notes(root: &str, scale_type: ScaleType) -> Result<Vec<String>, MuseError> {
    notes_from_offsets(root, scale_type.intervals())
}

/// Every scale type, in table order
pub fn all_scale_types() -> &'static [ScaleType] {
    &ScaleType::ALL
}
