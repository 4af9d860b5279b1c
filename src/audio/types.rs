//! Audio type definitions
//!
//! Configuration, presets and the tone requests handed to a [`ToneBackend`](super::ToneBackend).

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MuseError;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    #[default]
    Triangle,
}

impl Waveform {
    /// One sample of the waveform at `phase` in `[0.0, 1.0)`, ranging -1 to 1
    pub fn sample(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => phase * 2.0 - 1.0,
            Waveform::Triangle => {
                if phase < 0.5 {
                    phase * 4.0 - 1.0
                } else {
                    3.0 - phase * 4.0
                }
            }
        }
    }
}

/// Attack / decay / sustain / release envelope
///
/// # Fields
/// - `attack`: Seconds from silence to full volume
/// - `decay`: Seconds from full volume down to the sustain level
/// - `sustain`: Sustain level as a fraction of full volume (0-1)
/// - `release`: Seconds from the sustain level down to silence, ending at the note's end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.02,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

/// Sound settings applied to every voice of a play request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AudioConfig {
    pub adsr: Adsr,
    pub waveform: Waveform,
    pub master_volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            adsr: Adsr::default(),
            waveform: Waveform::Triangle,
            master_volume: 0.3,
        }
    }
}

impl AudioConfig {
    /// Default volume with a preset's waveform and envelope
    pub fn preset(preset: Preset) -> Self {
        Self {
            adsr: preset.adsr(),
            waveform: preset.waveform(),
            ..Self::default()
        }
    }

    /// Reject envelopes and volumes that cannot describe a sound
    pub fn validate(&self) -> Result<(), MuseError> {
        let Adsr {
            attack,
            decay,
            sustain,
            release,
        } = self.adsr;

        for (name, value) in [("attack", attack), ("decay", decay), ("release", release)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MuseError::Config(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&sustain) {
            return Err(MuseError::Config(format!(
                "sustain must be between 0 and 1, got {}",
                sustain
            )));
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(MuseError::Config(format!(
                "master-volume must be between 0 and 1, got {}",
                self.master_volume
            )));
        }
        Ok(())
    }
}

/// Built-in instrument sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Piano,
    Organ,
    Synth,
    Pad,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Piano, Preset::Organ, Preset::Synth, Preset::Pad];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Piano => "piano",
            Preset::Organ => "organ",
            Preset::Synth => "synth",
            Preset::Pad => "pad",
        }
    }

    pub fn waveform(self) -> Waveform {
        match self {
            Preset::Piano => Waveform::Triangle,
            Preset::Organ => Waveform::Sine,
            Preset::Synth => Waveform::Sawtooth,
            Preset::Pad => Waveform::Sine,
        }
    }

    pub fn adsr(self) -> Adsr {
        let (attack, decay, sustain, release) = match self {
            Preset::Piano => (0.02, 0.1, 0.7, 0.3),
            Preset::Organ => (0.05, 0.1, 0.9, 0.1),
            Preset::Synth => (0.01, 0.2, 0.5, 0.2),
            Preset::Pad => (0.3, 0.2, 0.8, 0.5),
        };
        Adsr {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

impl FromStr for Preset {
    type Err = MuseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == name)
            .ok_or_else(|| MuseError::Config(format!("Unknown preset: {}", name)))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chords to play back to back, each lasting `beats_per_chord` beats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordProgression {
    pub chords: Vec<Vec<String>>,
    pub beats_per_chord: u32,
}

/// Run state of a tone backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Running,
    /// Waiting for a resume, e.g. blocked until the user interacts with the page
    Suspended,
    Closed,
}

/// How the gain reaches a [`GainPoint`]'s value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ramp {
    /// Jump to the value at the point's time
    Set,
    /// Move linearly from the previous point to this one
    Linear,
}

/// One gain automation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GainPoint {
    pub time: f64,
    pub value: f64,
    pub ramp: Ramp,
}

/// Everything a backend needs to sound one oscillator voice
///
/// Times are on the backend's own clock ([`ToneBackend::current_time`](super::ToneBackend::current_time)).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneRequest {
    pub frequency: f64,
    pub waveform: Waveform,
    pub start_time: f64,
    pub stop_time: f64,
    pub envelope: Vec<GainPoint>,
}
