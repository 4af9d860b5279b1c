//! Playback scheduling engine
//!
//! Resolves notes to frequencies, lays them out in time and hands one
//! [`ToneRequest`] per voice to the backend.

use log::{debug, warn};

use super::backend::{ToneBackend, Voice};
use super::envelope::STOP_TAIL;
use super::timing::{beat_duration, calculate_chord_duration, calculate_chord_start_time};
use super::types::{AudioConfig, BackendState, ChordProgression, ToneRequest};
use crate::error::MuseError;
use crate::theory::note_to_frequency;

/// One in-flight play request
///
/// Owns the voices it started. Dropping it does not stop them; call
/// [`Playback::stop`] to cut playback short.
#[derive(Debug)]
pub struct Playback<V: Voice> {
    voices: Vec<V>,
    duration: f64,
}

impl<V: Voice> Playback<V> {
    /// A playback that started no voices (backend unavailable)
    fn silent(duration: f64) -> Self {
        Self {
            voices: Vec::new(),
            duration,
        }
    }

    /// Total length in seconds, for driving a progress indicator
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// True when the backend could not run and nothing was scheduled
    pub fn is_silent(&self) -> bool {
        self.voices.is_empty()
    }

    /// Silence every voice of this playback. Safe to call any number of times.
    pub fn stop(&self) {
        for voice in &self.voices {
            voice.stop();
        }
    }
}

/// A voice to schedule, relative to the moment playback begins
struct PlannedTone {
    frequency: f64,
    offset: f64,
    duration: f64,
    volume: f64,
}

/// Plays notes, chords, progressions and scales through an injected backend.
///
/// # Failure Policy
/// - Bad note text or a bad tempo is a caller bug and returns an error before
///   anything is scheduled.
/// - A backend that is suspended is resumed once per call. If it cannot run,
///   the failure is logged and a silent [`Playback`] is returned; sound is
///   never worth failing the caller over.
///
/// # Example
/// ```rust
/// use muselab::audio::{AudioEngine, ChordProgression, OfflineBackend};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let engine = AudioEngine::new(OfflineBackend::new(8_000));
/// let progression = ChordProgression {
///     chords: vec![
///         vec!["C4".into(), "E4".into(), "G4".into()],
///         vec!["G3".into(), "B3".into(), "D4".into()],
///     ],
///     beats_per_chord: 2,
/// };
///
/// let playback = engine.play_progression(&progression, 120.0, None).await.unwrap();
/// assert_eq!(playback.duration(), 2.0);
/// assert_eq!(playback.voice_count(), 6);
/// playback.stop();
/// # });
/// ```
pub struct AudioEngine<B: ToneBackend> {
    backend: B,
    config: AudioConfig,
}

impl<B: ToneBackend> AudioEngine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, AudioConfig::default())
    }

    pub fn with_config(backend: B, config: AudioConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Make sure the backend is running, resuming it if it is suspended
    pub async fn ensure_running(&self) -> Result<(), MuseError> {
        match self.backend.state() {
            BackendState::Running => Ok(()),
            BackendState::Suspended => self.backend.resume().await,
            BackendState::Closed => Err(MuseError::BackendUnavailable(
                "backend is closed".to_string(),
            )),
        }
    }

    /// Play one note for `duration` seconds at full master volume
    pub async fn play_note(
        &self,
        note: &str,
        duration: f64,
        config: Option<&AudioConfig>,
    ) -> Result<Playback<B::Voice>, MuseError> {
        let config = config.unwrap_or(&self.config);
        let duration = check_duration(duration)?;
        let tones = vec![PlannedTone {
            frequency: note_to_frequency(note)?,
            offset: 0.0,
            duration,
            volume: config.master_volume,
        }];
        Ok(self.start(tones, duration, config).await)
    }

    /// Play all notes together for `duration` seconds.
    ///
    /// Each voice gets `master_volume / sqrt(voices)` so a chord is not much
    /// louder than a single note.
    pub async fn play_chord(
        &self,
        notes: &[String],
        duration: f64,
        config: Option<&AudioConfig>,
    ) -> Result<Playback<B::Voice>, MuseError> {
        let config = config.unwrap_or(&self.config);
        let duration = check_duration(duration)?;
        let volume = voice_volume(config.master_volume, notes.len());

        let tones = notes
            .iter()
            .map(|note| {
                Ok(PlannedTone {
                    frequency: note_to_frequency(note)?,
                    offset: 0.0,
                    duration,
                    volume,
                })
            })
            .collect::<Result<Vec<_>, MuseError>>()?;

        Ok(self.start(tones, duration, config).await)
    }

    /// Play chords back to back, each lasting `beats_per_chord` beats.
    ///
    /// Voice volume is set from the largest chord in the progression so
    /// sparse and dense chords play at a steady level.
    pub async fn play_progression(
        &self,
        progression: &ChordProgression,
        tempo: f64,
        config: Option<&AudioConfig>,
    ) -> Result<Playback<B::Voice>, MuseError> {
        check_tempo(tempo)?;
        let config = config.unwrap_or(&self.config);
        let beats = progression.beats_per_chord;
        let chord_duration = calculate_chord_duration(tempo, beats);
        let widest = progression.chords.iter().map(Vec::len).max().unwrap_or(0);
        let volume = voice_volume(config.master_volume, widest);

        let mut tones = Vec::new();
        for (index, chord) in progression.chords.iter().enumerate() {
            let offset = calculate_chord_start_time(tempo, beats, index);
            for note in chord {
                tones.push(PlannedTone {
                    frequency: note_to_frequency(note)?,
                    offset,
                    duration: chord_duration,
                    volume,
                });
            }
        }

        let total = progression.chords.len() as f64 * chord_duration;
        Ok(self.start(tones, total, config).await)
    }

    /// Play notes one after another, one beat each
    pub async fn play_scale(
        &self,
        notes: &[String],
        tempo: f64,
        config: Option<&AudioConfig>,
    ) -> Result<Playback<B::Voice>, MuseError> {
        check_tempo(tempo)?;
        let config = config.unwrap_or(&self.config);
        let note_duration = beat_duration(tempo);

        let tones = notes
            .iter()
            .enumerate()
            .map(|(index, note)| {
                Ok(PlannedTone {
                    frequency: note_to_frequency(note)?,
                    offset: index as f64 * note_duration,
                    duration: note_duration,
                    volume: config.master_volume,
                })
            })
            .collect::<Result<Vec<_>, MuseError>>()?;

        let total = notes.len() as f64 * note_duration;
        Ok(self.start(tones, total, config).await)
    }

    /// Stop everything by closing the backend. Later play calls are silent.
    pub fn stop_all(&self) {
        self.backend.close();
    }

    async fn start(
        &self,
        tones: Vec<PlannedTone>,
        total: f64,
        config: &AudioConfig,
    ) -> Playback<B::Voice> {
        if let Err(e) = self.ensure_running().await {
            warn!("audio unavailable, skipping playback: {}", e);
            return Playback::silent(total);
        }

        let now = self.backend.current_time();
        let mut voices = Vec::with_capacity(tones.len());

        for tone in tones {
            let start_time = now + tone.offset;
            let request = ToneRequest {
                frequency: tone.frequency,
                waveform: config.waveform,
                start_time,
                stop_time: start_time + tone.duration + STOP_TAIL,
                envelope: config.adsr.schedule(start_time, tone.duration, tone.volume),
            };
            match self.backend.start_voice(request) {
                Ok(voice) => voices.push(voice),
                Err(e) => warn!("failed to start voice at {:.1} Hz: {}", tone.frequency, e),
            }
        }

        debug!("scheduled {} voices over {:.3}s", voices.len(), total);
        Playback {
            voices,
            duration: total,
        }
    }
}

/// Per-voice volume for `voices` simultaneous voices (equal-power mix)
fn voice_volume(master_volume: f64, voices: usize) -> f64 {
    master_volume / (voices.max(1) as f64).sqrt()
}

fn check_tempo(tempo: f64) -> Result<(), MuseError> {
    if tempo.is_finite() && tempo > 0.0 {
        Ok(())
    } else {
        Err(MuseError::InvalidTempo(tempo))
    }
}

/// Negative lengths become 0; NaN and infinity are rejected
fn check_duration(duration: f64) -> Result<f64, MuseError> {
    if duration.is_finite() {
        Ok(duration.max(0.0))
    } else {
        Err(MuseError::InvalidDuration(duration))
    }
}
