//! Property-based tests for muselab using proptest.
//!
//! These tests check the pitch arithmetic, chord and scale construction,
//! tempo math and progress transitions hold for arbitrary inputs.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use muselab::progress::{
    add_training_result_at, calculate_accuracy, calculate_progress_percentage, deserialize_progress,
    mark_item_complete_at, serialize_progress, update_module_progress, LearningProgress,
    TrainingResult, DEFAULT_MODULES,
};
use muselab::{
    calculate_chord_duration, calculate_chord_start_time, get_chord_notes, get_interval,
    get_scale_notes, midi_to_note, note_to_frequency, note_to_midi, transpose_note,
    ChordType, IntervalName, ScaleType,
};

// ============================================================================
// Strategies
// ============================================================================

/// Note text between C0 and B8, in either spelling
fn arbitrary_note() -> impl Strategy<Value = String> {
    (12i32..=119, any::<bool>()).prop_map(|(midi, flats)| midi_to_note(midi, flats))
}

/// Note text between C2 and C7, leaving room to transpose two octaves either way
fn middle_note() -> impl Strategy<Value = String> {
    (36i32..=96, any::<bool>()).prop_map(|(midi, flats)| midi_to_note(midi, flats))
}

fn arbitrary_chord_type() -> impl Strategy<Value = ChordType> {
    prop::sample::select(ChordType::ALL.to_vec())
}

fn arbitrary_scale_type() -> impl Strategy<Value = ScaleType> {
    prop::sample::select(ScaleType::ALL.to_vec())
}

/// A progress record built through the public transitions
fn arbitrary_progress() -> impl Strategy<Value = LearningProgress> {
    (
        prop::collection::vec(("[a-z]{1,8}", 0i64..30), 0..6),
        prop::collection::vec(
            (
                prop::sample::select(vec!["interval", "chord", "rhythm"]),
                any::<bool>(),
                0i64..30,
            ),
            0..8,
        ),
        prop::collection::vec(
            (prop::sample::select(DEFAULT_MODULES.to_vec()), 0usize..=20, 1usize..=20),
            0..4,
        ),
    )
        .prop_map(|(items, answers, modules)| {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            let mut progress = LearningProgress::default();
            for (item, day) in items {
                progress = mark_item_complete_at(&progress, &item, start + Duration::days(day));
            }
            for (category, correct, day) in answers {
                progress =
                    add_training_result_at(&progress, category, correct, start + Duration::days(day));
            }
            for (module, done, total) in modules {
                progress = update_module_progress(&progress, module, done, total);
            }
            progress
        })
}

// ============================================================================
// Pitch arithmetic
// ============================================================================

proptest! {
    /// Twelve semitones up doubles the frequency.
    #[test]
    fn octave_doubles_frequency(midi in 12i32..=107) {
        let low = note_to_frequency(&midi_to_note(midi, false)).unwrap();
        let high = note_to_frequency(&midi_to_note(midi + 12, false)).unwrap();
        prop_assert!((high / low - 2.0).abs() < 1e-9);
    }

    /// Higher notes always have higher frequencies.
    #[test]
    fn frequency_is_monotonic(midi in 12i32..=118) {
        let lower = note_to_frequency(&midi_to_note(midi, false)).unwrap();
        let higher = note_to_frequency(&midi_to_note(midi + 1, false)).unwrap();
        prop_assert!(higher > lower);
    }

    /// MIDI numbers survive a trip through note text in either spelling.
    #[test]
    fn midi_round_trip(midi in 12i32..=119, flats in any::<bool>()) {
        prop_assert_eq!(note_to_midi(&midi_to_note(midi, flats)).unwrap(), midi);
    }

    /// Canonical note text survives a trip through MIDI.
    #[test]
    fn note_text_round_trip(midi in 12i32..=119, flats in any::<bool>()) {
        let note = midi_to_note(midi, flats);
        prop_assert_eq!(midi_to_note(note_to_midi(&note).unwrap(), flats), note);
    }

    /// Transposing by zero changes nothing.
    #[test]
    fn transpose_zero_is_identity(note in arbitrary_note()) {
        prop_assert_eq!(transpose_note(&note, 0).unwrap(), note);
    }

    /// Transposing up then down returns to the same pitch.
    #[test]
    fn transpose_round_trip(note in middle_note(), semitones in -24i32..=24) {
        let there = transpose_note(&note, semitones).unwrap();
        let back = transpose_note(&there, -semitones).unwrap();
        prop_assert_eq!(note_to_midi(&back).unwrap(), note_to_midi(&note).unwrap());
        prop_assert_eq!(
            note_to_midi(&there).unwrap() - note_to_midi(&note).unwrap(),
            semitones
        );
    }

    /// Any note to itself is a unison.
    #[test]
    fn interval_to_self_is_unison(note in arbitrary_note()) {
        let interval = get_interval(&note, &note).unwrap();
        prop_assert_eq!(interval.name, IntervalName::Unison);
        prop_assert_eq!(interval.semitones, 0);
    }

    /// Interval naming ignores argument order.
    #[test]
    fn interval_is_symmetric(a in middle_note(), b in middle_note()) {
        let forward = get_interval(&a, &b).unwrap();
        prop_assert_eq!(get_interval(&b, &a).unwrap(), forward);
        prop_assert!(forward.semitones < 12);
    }

    /// Moving both notes by the same octaves keeps the interval.
    #[test]
    fn interval_survives_shared_octave_shift(a in middle_note(), b in middle_note(), octaves in -2i32..=2) {
        let shifted_a = transpose_note(&a, octaves * 12).unwrap();
        let shifted_b = transpose_note(&b, octaves * 12).unwrap();
        prop_assert_eq!(get_interval(&shifted_a, &shifted_b).unwrap(), get_interval(&a, &b).unwrap());
    }

    /// Widening by an octave (higher note up, lower note down) keeps the simple name.
    #[test]
    fn compound_interval_keeps_name(a in middle_note(), b in middle_note()) {
        let (low, high) = if note_to_midi(&a).unwrap() <= note_to_midi(&b).unwrap() {
            (a, b)
        } else {
            (b, a)
        };
        let simple = get_interval(&low, &high).unwrap();

        let raised = transpose_note(&high, 12).unwrap();
        prop_assert_eq!(get_interval(&low, &raised).unwrap(), simple);
        let lowered = transpose_note(&low, -12).unwrap();
        prop_assert_eq!(get_interval(&lowered, &high).unwrap(), simple);
    }
}

// ============================================================================
// Chords and scales
// ============================================================================

proptest! {
    /// A chord starts on its root and has one note per interval.
    #[test]
    fn chord_starts_on_root(root in middle_note(), chord_type in arbitrary_chord_type()) {
        let notes = get_chord_notes(&root, chord_type).unwrap();
        prop_assert_eq!(&notes[0], &root);
        prop_assert_eq!(notes.len(), chord_type.intervals().len());

        let root_midi = note_to_midi(&root).unwrap();
        for (note, offset) in notes.iter().zip(chord_type.intervals()) {
            prop_assert_eq!(note_to_midi(note).unwrap() - root_midi, *offset);
        }
    }

    /// Major and minor triads have the expected thirds.
    #[test]
    fn triad_thirds(root in middle_note()) {
        let major = get_chord_notes(&root, ChordType::Major).unwrap();
        let minor = get_chord_notes(&root, ChordType::Minor).unwrap();
        prop_assert_eq!(get_interval(&major[0], &major[1]).unwrap().name, IntervalName::Major3rd);
        prop_assert_eq!(get_interval(&minor[0], &minor[1]).unwrap().name, IntervalName::Minor3rd);
    }

    /// Scales start on the root with 7, 5 or 6 notes.
    #[test]
    fn scale_shape(root in middle_note(), scale_type in arbitrary_scale_type()) {
        let notes = get_scale_notes(&root, scale_type).unwrap();
        prop_assert_eq!(&notes[0], &root);

        let expected = match scale_type {
            ScaleType::PentatonicMajor | ScaleType::PentatonicMinor => 5,
            ScaleType::Blues => 6,
            _ => 7,
        };
        prop_assert_eq!(notes.len(), expected);

        let midis: Vec<i32> = notes.iter().map(|n| note_to_midi(n).unwrap()).collect();
        prop_assert!(midis.windows(2).all(|w| w[0] < w[1]));
    }
}

// ============================================================================
// Tempo math
// ============================================================================

proptest! {
    /// Chord durations are positive, shrink with tempo and grow with beats.
    #[test]
    fn chord_duration_ordering(tempo in 20.0f64..300.0, beats in 1u32..16) {
        let duration = calculate_chord_duration(tempo, beats);
        prop_assert!(duration > 0.0);
        prop_assert!(calculate_chord_duration(tempo + 1.0, beats) < duration);
        prop_assert!(calculate_chord_duration(tempo, beats + 1) > duration);
    }

    /// Chords are back to back: no gap, no overlap.
    #[test]
    fn chord_start_times_are_contiguous(tempo in 20.0f64..300.0, beats in 1u32..16, index in 0usize..64) {
        prop_assert_eq!(calculate_chord_start_time(tempo, beats, 0), 0.0);

        let gap = calculate_chord_start_time(tempo, beats, index + 1)
            - calculate_chord_start_time(tempo, beats, index);
        prop_assert!(gap > 0.0);
        prop_assert!((gap - calculate_chord_duration(tempo, beats)).abs() < 1e-9);
    }
}

// ============================================================================
// Learning progress
// ============================================================================

proptest! {
    /// Percentages stay in range and never go down as more is completed.
    #[test]
    fn percentage_bounds(done in 0usize..200, total in 0usize..200) {
        let percentage = calculate_progress_percentage(done, total);
        prop_assert!(percentage <= 100);
        prop_assert!(calculate_progress_percentage(done + 1, total) >= percentage);
        if total > 0 {
            prop_assert_eq!(calculate_progress_percentage(total, total), 100);
            prop_assert_eq!(calculate_progress_percentage(0, total), 0);
        }
    }

    /// Accuracy is a percentage.
    #[test]
    fn accuracy_bounds(answers in prop::collection::vec(any::<bool>(), 0..50)) {
        let results: Vec<TrainingResult> = answers
            .iter()
            .map(|&correct| TrainingResult {
                category: "interval".to_string(),
                correct,
                timestamp: 0,
            })
            .collect();
        let accuracy = calculate_accuracy(&results, None);
        prop_assert!(accuracy <= 100);
        prop_assert_eq!(calculate_accuracy(&results, Some("interval")), accuracy);
        prop_assert_eq!(calculate_accuracy(&results, Some("rhythm")), 0);
    }

    /// Serializing and deserializing gives back the same record.
    #[test]
    fn serialize_round_trip(progress in arbitrary_progress()) {
        let json = serialize_progress(&progress).unwrap();
        prop_assert_eq!(deserialize_progress(&json).unwrap(), progress);
    }

    /// Marking an already completed item is a no-op.
    #[test]
    fn mark_complete_is_idempotent(progress in arbitrary_progress(), item in "[a-z]{1,8}", day in 0i64..60) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(day);
        let once = mark_item_complete_at(&progress, &item, now);
        let twice = mark_item_complete_at(&once, &item, now + Duration::days(1));
        prop_assert_eq!(twice, once);
    }

    /// Any study action leaves a streak of at least one.
    #[test]
    fn study_keeps_streak_positive(progress in arbitrary_progress(), correct in any::<bool>()) {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let next = add_training_result_at(&progress, "chord", correct, now);
        prop_assert!(next.streak >= 1);
        prop_assert_eq!(next.last_study_date.as_str(), "2024-03-01");
    }
}
