//! # Engine Configuration
//!
//! Optional YAML settings for the audio and progress engines. Every key may be
//! left out; omitted keys take the built-in defaults.
//!
//! ```yaml
//! default-tempo: 96
//! audio:
//!   base: organ          # start from a built-in preset
//!   master-volume: 0.25
//! presets:
//!   bright:
//!     base: synth
//!     waveform: square
//!     release: 0.4
//!   piano:               # overrides the built-in piano
//!     sustain: 0.6
//! progress:
//!   storage-key: music-progress-v2
//!   tracked-modules: [theory, chords, production, earTraining, rhythm]
//! ```
//!
//! Sound settings (`audio` and each preset) accept `base`, `waveform`,
//! `master-volume`, `attack`, `decay`, `sustain` and `release`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::audio::{AudioConfig, Preset, Waveform};
use crate::error::MuseError;
use crate::progress::{DEFAULT_MODULES, STORAGE_KEY};

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    audio: Option<RawSound>,
    default_tempo: Option<f64>,
    #[serde(default)]
    presets: BTreeMap<String, RawSound>,
    progress: Option<RawProgress>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSound {
    base: Option<String>,
    waveform: Option<Waveform>,
    master_volume: Option<f64>,
    attack: Option<f64>,
    decay: Option<f64>,
    sustain: Option<f64>,
    release: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawProgress {
    storage_key: Option<String>,
    tracked_modules: Option<Vec<String>>,
}

impl RawSound {
    /// Apply these overrides on top of `base`
    fn merge_over(&self, base: AudioConfig) -> AudioConfig {
        let mut config = base;
        if let Some(waveform) = self.waveform {
            config.waveform = waveform;
        }
        if let Some(volume) = self.master_volume {
            config.master_volume = volume;
        }
        if let Some(attack) = self.attack {
            config.adsr.attack = attack;
        }
        if let Some(decay) = self.decay {
            config.adsr.decay = decay;
        }
        if let Some(sustain) = self.sustain {
            config.adsr.sustain = sustain;
        }
        if let Some(release) = self.release {
            config.adsr.release = release;
        }
        config
    }
}

/// Where the progress record lives and which modules it tracks
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    pub storage_key: String,
    pub tracked_modules: Vec<String>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            tracked_modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Resolved settings for the whole engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sound used when a play call passes no config of its own
    pub audio: AudioConfig,
    /// Tempo in BPM for callers that do not choose one
    pub default_tempo: f64,
    /// Built-in presets (possibly overridden) plus any user-defined ones
    pub presets: BTreeMap<String, AudioConfig>,
    pub progress: ProgressConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            default_tempo: 120.0,
            presets: builtin_presets(),
            progress: ProgressConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML configuration
    pub fn from_yaml(content: &str) -> Result<Self, MuseError> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| MuseError::Config(e.to_string()))?
        };

        let mut presets = builtin_presets();
        for (name, sound) in &raw.presets {
            let base = match &sound.base {
                Some(base) => lookup(&presets, base)?,
                None => presets.get(name).copied().unwrap_or_default(),
            };
            presets.insert(name.clone(), sound.merge_over(base));
        }

        let audio = match &raw.audio {
            Some(sound) => {
                let base = match &sound.base {
                    Some(base) => lookup(&presets, base)?,
                    None => AudioConfig::default(),
                };
                sound.merge_over(base)
            }
            None => AudioConfig::default(),
        };

        let defaults = ProgressConfig::default();
        let progress = match raw.progress {
            Some(p) => ProgressConfig {
                storage_key: p.storage_key.unwrap_or(defaults.storage_key),
                tracked_modules: p.tracked_modules.unwrap_or(defaults.tracked_modules),
            },
            None => defaults,
        };

        let config = EngineConfig {
            audio,
            default_tempo: raw.default_tempo.unwrap_or(120.0),
            presets,
            progress,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file
    pub fn load(path: &Path) -> Result<Self, MuseError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MuseError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Sound settings for a preset by name
    pub fn preset(&self, name: &str) -> Result<AudioConfig, MuseError> {
        lookup(&self.presets, name)
    }

    pub fn validate(&self) -> Result<(), MuseError> {
        self.audio.validate()?;
        for (name, preset) in &self.presets {
            preset
                .validate()
                .map_err(|e| MuseError::Config(format!("preset '{}': {}", name, e)))?;
        }

        if !self.default_tempo.is_finite() || self.default_tempo <= 0.0 {
            return Err(MuseError::Config(format!(
                "default-tempo must be a positive number of BPM, got {}",
                self.default_tempo
            )));
        }

        if self.progress.storage_key.is_empty() {
            return Err(MuseError::Config("storage-key must not be empty".to_string()));
        }
        if let Some(module) = self.progress.tracked_modules.iter().find(|m| m.is_empty()) {
            return Err(MuseError::Config(format!(
                "tracked-modules contains an empty name: {:?}",
                module
            )));
        }
        Ok(())
    }
}

fn builtin_presets() -> BTreeMap<String, AudioConfig> {
    Preset::ALL
        .iter()
        .map(|&preset| (preset.to_string(), AudioConfig::preset(preset)))
        .collect()
}

fn lookup(presets: &BTreeMap<String, AudioConfig>, name: &str) -> Result<AudioConfig, MuseError> {
    presets
        .get(name)
        .copied()
        .ok_or_else(|| MuseError::Config(format!("Unknown preset: {}", name)))
}
