//! Tempo arithmetic for chord and scale playback
//!
//! A beat is a quarter note: at 60 BPM it lasts one second, at 120 BPM half a
//! second. Chords in a progression follow each other with no gap and no overlap.

/// Seconds per beat at a tempo
pub fn beat_duration(tempo: f64) -> f64 {
    60.0 / tempo
}

/// Seconds one chord lasts: `beats_per_chord * 60 / tempo`
///
/// # Examples
/// ```
/// use muselab::calculate_chord_duration;
///
/// assert_eq!(calculate_chord_duration(60.0, 4), 4.0);
/// assert_eq!(calculate_chord_duration(120.0, 2), 1.0);
/// ```
pub fn calculate_chord_duration(tempo: f64, beats_per_chord: u32) -> f64 {
    beats_per_chord as f64 * beat_duration(tempo)
}

/// Offset in seconds from the start of a progression to chord `chord_index`
///
/// # Examples
/// ```
/// use muselab::calculate_chord_start_time;
///
/// let starts: Vec<f64> = (0..4).map(|i| calculate_chord_start_time(120.0, 2, i)).collect();
/// assert_eq!(starts, vec![0.0, 1.0, 2.0, 3.0]);
/// ```
pub fn calculate_chord_start_time(tempo: f64, beats_per_chord: u32, chord_index: usize) -> f64 {
    chord_index as f64 * calculate_chord_duration(tempo, beats_per_chord)
}
