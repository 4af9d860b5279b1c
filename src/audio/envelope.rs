//! ADSR envelope scheduling
//!
//! Turns an [`Adsr`] into gain automation points for one voice, and evaluates
//! those points at an arbitrary time for offline rendering.

use super::types::{Adsr, GainPoint, Ramp};

/// Extra time an oscillator keeps running after its envelope reaches zero
pub const STOP_TAIL: f64 = 0.1;

impl Adsr {
    /// Gain automation for a voice sounding from `start` for `duration` seconds
    /// at peak `volume`.
    ///
    /// ```text
    /// volume ──  /\
    ///           /  \________
    /// sustain  /            \
    ///     0 ──/              \──
    ///       start          start + duration
    /// ```
    ///
    /// Stages that do not fit inside the note are cut short at its end, so the
    /// points are always in time order. The sustain hold is only emitted when
    /// the release starts after the decay has finished.
    pub fn schedule(&self, start: f64, duration: f64, volume: f64) -> Vec<GainPoint> {
        let end = start + duration;
        let attack_end = (start + self.attack).min(end);
        let decay_end = (attack_end + self.decay).min(end);
        let sustain_level = volume * self.sustain;
        let sustain_end = end - self.release;

        let mut points = vec![
            GainPoint {
                time: start,
                value: 0.0,
                ramp: Ramp::Set,
            },
            GainPoint {
                time: attack_end,
                value: volume,
                ramp: Ramp::Linear,
            },
            GainPoint {
                time: decay_end,
                value: sustain_level,
                ramp: Ramp::Linear,
            },
        ];

        if sustain_end > decay_end {
            points.push(GainPoint {
                time: sustain_end,
                value: sustain_level,
                ramp: Ramp::Set,
            });
        }

        points.push(GainPoint {
            time: end,
            value: 0.0,
            ramp: Ramp::Linear,
        });
        points
    }
}

/// Gain at `time` for automation points in time order.
///
/// Before the first point the gain is zero; after the last it holds the last
/// value. A linear point ramps from the previous point's time and value.
pub fn gain_at(points: &[GainPoint], time: f64) -> f64 {
    let next = points.iter().position(|p| p.time > time);

    match next {
        Some(0) => 0.0,
        None => points.last().map_or(0.0, |p| p.value),
        Some(i) => {
            let prev = &points[i - 1];
            let next = &points[i];
            match next.ramp {
                Ramp::Set => prev.value,
                Ramp::Linear => {
                    let span = next.time - prev.time;
                    let t = (time - prev.time) / span;
                    prev.value + (next.value - prev.value) * t
                }
            }
        }
    }
}
