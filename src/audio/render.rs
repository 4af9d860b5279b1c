//! Offline tone backend
//!
//! Records voices against a manually advanced clock and renders them to mono
//! samples (oscillator times envelope, summed) or to a 16-bit WAV file.

use std::cell::{Cell, RefCell};
use std::io::{Seek, Write};
use std::path::Path;
use std::rc::Rc;

use super::backend::{ToneBackend, Voice};
use super::envelope::gain_at;
use super::types::{BackendState, ToneRequest};
use crate::error::MuseError;

#[derive(Debug)]
struct RecordedVoice {
    request: ToneRequest,
    stopped_at: Cell<Option<f64>>,
}

impl RecordedVoice {
    /// Time the oscillator actually goes quiet
    fn end_time(&self) -> f64 {
        match self.stopped_at.get() {
            Some(stopped) => stopped.min(self.request.stop_time),
            None => self.request.stop_time,
        }
    }
}

/// Voice handle returned by [`OfflineBackend`]
#[derive(Debug, Clone)]
pub struct OfflineVoice {
    voice: Rc<RecordedVoice>,
    clock: Rc<Cell<f64>>,
}

impl Voice for OfflineVoice {
    fn stop(&self) {
        if self.voice.stopped_at.get().is_none() {
            self.voice.stopped_at.set(Some(self.clock.get()));
        }
    }
}

/// Backend that renders instead of playing.
///
/// Starts suspended, like a browser audio context before the first user
/// gesture; the engine resumes it on first use. The clock only moves when
/// [`OfflineBackend::advance`] is called.
#[derive(Debug)]
pub struct OfflineBackend {
    sample_rate: u32,
    state: Cell<BackendState>,
    clock: Rc<Cell<f64>>,
    voices: RefCell<Vec<Rc<RecordedVoice>>>,
}

impl OfflineBackend {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            state: Cell::new(BackendState::Suspended),
            clock: Rc::new(Cell::new(0.0)),
            voices: RefCell::new(Vec::new()),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Move the clock forward
    pub fn advance(&self, seconds: f64) {
        self.clock.set(self.clock.get() + seconds.max(0.0));
    }

    /// Every request scheduled so far, in scheduling order
    pub fn requests(&self) -> Vec<ToneRequest> {
        self.voices
            .borrow()
            .iter()
            .map(|voice| voice.request.clone())
            .collect()
    }

    /// Seconds until the last voice goes quiet
    pub fn length(&self) -> f64 {
        self.voices
            .borrow()
            .iter()
            .map(|voice| voice.end_time())
            .fold(0.0, f64::max)
    }

    /// Mix every voice into mono samples in `[-1.0, 1.0]`, starting at time 0
    pub fn render(&self) -> Vec<f32> {
        let rate = self.sample_rate as f64;
        let total = (self.length() * rate).ceil() as usize;
        let mut mix = vec![0.0_f64; total];

        for voice in self.voices.borrow().iter() {
            let request = &voice.request;
            let first = (request.start_time * rate).ceil().max(0.0) as usize;
            let last = ((voice.end_time() * rate).ceil() as usize).min(total);

            for (i, sample) in mix.iter_mut().enumerate().take(last).skip(first) {
                let t = i as f64 / rate;
                let phase = (request.frequency * (t - request.start_time)).fract();
                *sample += request.waveform.sample(phase) * gain_at(&request.envelope, t);
            }
        }

        mix.into_iter()
            .map(|s| s.clamp(-1.0, 1.0) as f32)
            .collect()
    }

    /// Render and write a mono 16-bit WAV to any seekable writer
    pub fn write_wav<W: Write + Seek>(&self, writer: W) -> Result<(), MuseError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut wav = hound::WavWriter::new(writer, spec)
            .map_err(|e| MuseError::Render(e.to_string()))?;

        for sample in self.render() {
            wav.write_sample((sample * i16::MAX as f32) as i16)
                .map_err(|e| MuseError::Render(e.to_string()))?;
        }
        wav.finalize().map_err(|e| MuseError::Render(e.to_string()))
    }

    /// Render and write a mono 16-bit WAV file
    pub fn save_wav(&self, path: &Path) -> Result<(), MuseError> {
        let file = std::fs::File::create(path).map_err(|e| {
            MuseError::Render(format!("Failed to create '{}': {}", path.display(), e))
        })?;
        self.write_wav(std::io::BufWriter::new(file))
    }
}

impl ToneBackend for OfflineBackend {
    type Voice = OfflineVoice;

    fn state(&self) -> BackendState {
        self.state.get()
    }

    async fn resume(&self) -> Result<(), MuseError> {
        match self.state.get() {
            BackendState::Closed => Err(MuseError::BackendUnavailable(
                "offline backend is closed".to_string(),
            )),
            _ => {
                self.state.set(BackendState::Running);
                Ok(())
            }
        }
    }

    fn current_time(&self) -> f64 {
        self.clock.get()
    }

    fn start_voice(&self, request: ToneRequest) -> Result<OfflineVoice, MuseError> {
        if self.state.get() == BackendState::Closed {
            return Err(MuseError::BackendUnavailable(
                "offline backend is closed".to_string(),
            ));
        }
        let voice = Rc::new(RecordedVoice {
            request,
            stopped_at: Cell::new(None),
        });
        self.voices.borrow_mut().push(Rc::clone(&voice));
        Ok(OfflineVoice {
            voice,
            clock: Rc::clone(&self.clock),
        })
    }

    fn close(&self) {
        let now = self.clock.get();
        for voice in self.voices.borrow().iter() {
            if voice.stopped_at.get().is_none() {
                voice.stopped_at.set(Some(now));
            }
        }
        self.state.set(BackendState::Closed);
    }
}
