use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::*;
use crate::error::MuseError;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn result(category: &str, correct: bool) -> TrainingResult {
    TrainingResult {
        category: category.to_string(),
        correct,
        timestamp: 0,
    }
}

/// Store whose reads and writes always fail
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, MuseError> {
        Err(MuseError::Storage("quota exceeded".to_string()))
    }

    fn set(&mut self, _key: &str, _value: String) -> Result<(), MuseError> {
        Err(MuseError::Storage("quota exceeded".to_string()))
    }
}

#[test]
fn test_default_progress() {
    let progress = LearningProgress::default();
    assert!(progress.completed.is_empty());
    assert!(progress.results.is_empty());
    assert_eq!(progress.last_study_date, "");
    assert_eq!(progress.streak, 0);
    assert_eq!(
        progress.module_progress.keys().collect::<Vec<_>>(),
        vec!["chords", "earTraining", "production", "theory"]
    );
    assert!(progress.module_progress.values().all(|&v| v == 0));
    assert_eq!(LearningProgress::reset(), progress);
}

#[test]
fn test_streak_first_study() {
    assert_eq!(calculate_streak("", 0, date(2024, 3, 1)), 1);
    assert_eq!(calculate_streak("", 9, date(2024, 3, 1)), 1);
}

#[test]
fn test_streak_same_day() {
    assert_eq!(calculate_streak("2024-03-01", 5, date(2024, 3, 1)), 5);
    assert_eq!(calculate_streak("2024-03-01", 0, date(2024, 3, 1)), 1);
}

#[test]
fn test_same_day_study_on_restored_record() {
    // Stored data with a date but no streak
    let restored = deserialize_progress(r#"{"lastStudyDate":"2024-03-01"}"#).unwrap();
    assert_eq!(restored.streak, 0);

    let trained = add_training_result_at(&restored, "interval", true, at(2024, 3, 1, 10));
    assert_eq!(trained.streak, 1);

    let completed = mark_item_complete_at(&restored, "triads", at(2024, 3, 1, 18));
    assert_eq!(completed.streak, 1);
    assert_eq!(completed.last_study_date, "2024-03-01");
}

#[test]
fn test_streak_consecutive_days() {
    assert_eq!(calculate_streak("2024-02-29", 5, date(2024, 3, 1)), 6);
    assert_eq!(calculate_streak("2023-12-31", 1, date(2024, 1, 1)), 2);
}

#[test]
fn test_streak_resets() {
    // Gap of two days
    assert_eq!(calculate_streak("2024-02-28", 5, date(2024, 3, 1)), 1);
    // Last study date in the future
    assert_eq!(calculate_streak("2024-03-02", 5, date(2024, 3, 1)), 1);
    // Garbage date
    assert_eq!(calculate_streak("yesterday", 5, date(2024, 3, 1)), 1);
}

#[test]
fn test_progress_percentage() {
    assert_eq!(calculate_progress_percentage(0, 10), 0);
    assert_eq!(calculate_progress_percentage(10, 10), 100);
    assert_eq!(calculate_progress_percentage(0, 0), 0);
    assert_eq!(calculate_progress_percentage(1, 8), 13);
    assert_eq!(calculate_progress_percentage(15, 10), 100);
}

#[test]
fn test_progress_percentage_monotonic() {
    let values: Vec<u32> = (0..=7).map(|done| calculate_progress_percentage(done, 7)).collect();
    for pair in values.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn test_accuracy() {
    assert_eq!(calculate_accuracy(&[], None), 0);

    let all_right = vec![result("interval", true), result("chord", true)];
    assert_eq!(calculate_accuracy(&all_right, None), 100);

    let all_wrong = vec![result("interval", false), result("chord", false)];
    assert_eq!(calculate_accuracy(&all_wrong, None), 0);

    let mixed = vec![
        result("interval", true),
        result("interval", false),
        result("interval", true),
        result("chord", false),
    ];
    assert_eq!(calculate_accuracy(&mixed, None), 50);
    assert_eq!(calculate_accuracy(&mixed, Some("interval")), 67);
    assert_eq!(calculate_accuracy(&mixed, Some("chord")), 0);
    assert_eq!(calculate_accuracy(&mixed, Some("rhythm")), 0);
}

#[test]
fn test_mark_item_complete() {
    let progress = LearningProgress::default();
    let next = mark_item_complete_at(&progress, "major-scale", at(2024, 3, 1, 10));

    assert!(is_item_completed(&next, "major-scale"));
    assert!(!is_item_completed(&next, "minor-scale"));
    assert_eq!(next.last_study_date, "2024-03-01");
    assert_eq!(next.streak, 1);

    // The input record is untouched
    assert!(progress.completed.is_empty());
}

#[test]
fn test_mark_item_complete_is_idempotent() {
    let once = mark_item_complete_at(
        &LearningProgress::default(),
        "major-scale",
        at(2024, 3, 1, 10),
    );
    // Repeat on the next day does not bump the streak or the date
    let twice = mark_item_complete_at(&once, "major-scale", at(2024, 3, 2, 10));

    assert_eq!(twice, once);
    assert_eq!(twice.completed.len(), 1);
}

#[test]
fn test_add_training_result() {
    let now = at(2024, 3, 1, 12);
    let progress = add_training_result_at(&LearningProgress::default(), "interval", true, now);

    assert_eq!(
        progress.results,
        vec![TrainingResult {
            category: "interval".to_string(),
            correct: true,
            timestamp: now.timestamp_millis(),
        }]
    );
    assert_eq!(progress.last_study_date, "2024-03-01");
    assert_eq!(progress.streak, 1);

    // Same day again keeps the streak
    let progress = add_training_result_at(&progress, "chord", false, at(2024, 3, 1, 18));
    assert_eq!(progress.results.len(), 2);
    assert_eq!(progress.streak, 1);
}

#[test]
fn test_streak_scenario() {
    let progress = LearningProgress::default();

    let progress = mark_item_complete_at(&progress, "a", at(2024, 5, 1, 8));
    assert_eq!(progress.streak, 1);

    let progress = add_training_result_at(&progress, "interval", true, at(2024, 5, 2, 21));
    assert_eq!(progress.streak, 2);

    // Skip May 3rd
    let progress = mark_item_complete_at(&progress, "b", at(2024, 5, 4, 7));
    assert_eq!(progress.streak, 1);
    assert_eq!(progress.last_study_date, "2024-05-04");
}

#[test]
fn test_update_module_progress() {
    let progress = mark_item_complete_at(&LearningProgress::default(), "a", at(2024, 3, 1, 9));
    let next = update_module_progress(&progress, "chords", 3, 4);

    assert_eq!(next.module_progress["chords"], 75);
    assert_eq!(next.module_progress["theory"], 0);
    assert_eq!(next.streak, progress.streak);
    assert_eq!(next.last_study_date, progress.last_study_date);

    let next = update_module_progress(&next, "rhythm", 1, 2);
    assert_eq!(next.module_progress["rhythm"], 50);
}

#[test]
fn test_recent_results_newest_first() {
    let mut progress = LearningProgress::default();
    for i in 0..15 {
        progress = add_training_result_at(&progress, "interval", i % 2 == 0, at(2024, 3, 1, 0) + chrono::Duration::minutes(i));
    }

    let recent = recent_results(&progress, RECENT_RESULTS);
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].timestamp, progress.results[14].timestamp);
    assert_eq!(recent[9].timestamp, progress.results[5].timestamp);

    assert_eq!(recent_results(&progress, 100).len(), 15);
    assert!(recent_results(&LearningProgress::default(), 10).is_empty());
}

#[test]
fn test_learning_statistics() {
    let progress = LearningProgress::default();
    let progress = mark_item_complete_at(&progress, "a", at(2024, 3, 1, 9));
    let progress = mark_item_complete_at(&progress, "b", at(2024, 3, 1, 10));
    let progress = add_training_result_at(&progress, "interval", true, at(2024, 3, 1, 11));
    let progress = add_training_result_at(&progress, "interval", false, at(2024, 3, 1, 12));
    let progress = update_module_progress(&progress, "theory", 2, 5);

    let stats = get_learning_statistics(&progress, 4);
    assert_eq!(stats.total_completed, 2);
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.overall_progress, 50);
    assert_eq!(stats.accuracy, 50);
    assert_eq!(stats.module_progress["theory"], 40);

    assert_eq!(get_learning_statistics(&progress, 0).overall_progress, 0);
}

#[test]
fn test_serialize_layout() {
    let progress = add_training_result_at(
        &mark_item_complete_at(&LearningProgress::default(), "triads", at(2024, 3, 1, 9)),
        "chord",
        true,
        at(2024, 3, 1, 9),
    );
    let json: serde_json::Value = serde_json::from_str(&serialize_progress(&progress).unwrap()).unwrap();

    assert_eq!(json["completedKnowledgePoints"], serde_json::json!(["triads"]));
    assert_eq!(json["earTrainingResults"][0]["questionType"], "chord");
    assert_eq!(json["earTrainingResults"][0]["correct"], true);
    assert_eq!(json["lastStudyDate"], "2024-03-01");
    assert_eq!(json["streak"], 1);
    assert_eq!(json["moduleProgress"]["earTraining"], 0);
}

#[test]
fn test_serialize_round_trip() {
    let progress = LearningProgress::default();
    let progress = mark_item_complete_at(&progress, "a", at(2024, 3, 1, 9));
    let progress = add_training_result_at(&progress, "rhythm", false, at(2024, 3, 2, 9));
    let progress = update_module_progress(&progress, "production", 1, 3);

    let restored = deserialize_progress(&serialize_progress(&progress).unwrap()).unwrap();
    assert_eq!(restored, progress);
}

#[test]
fn test_deserialize_fills_defaults() {
    let restored = deserialize_progress("{}").unwrap();
    assert_eq!(restored, LearningProgress::default());

    let restored = deserialize_progress(
        r#"{"completedKnowledgePoints": ["a", "a", "b"], "streak": 4, "moduleProgress": {"theory": 80, "mixing": 10}}"#,
    )
    .unwrap();
    assert_eq!(restored.completed.len(), 2);
    assert_eq!(restored.streak, 4);
    assert_eq!(restored.last_study_date, "");
    assert_eq!(restored.module_progress["theory"], 80);
    assert_eq!(restored.module_progress["chords"], 0);
    assert_eq!(restored.module_progress["mixing"], 10);
}

#[test]
fn test_deserialize_rejects_malformed() {
    for data in ["", "not json", "{\"streak\": ", "[1, 2]", "null", "{\"streak\": \"five\"}"] {
        assert!(
            matches!(deserialize_progress(data), Err(MuseError::InvalidProgressData(_))),
            "{:?}",
            data
        );
    }
}

#[test]
fn test_word_progress_levels() {
    let now = at(2024, 3, 1, 9);
    let vocabulary = VocabularyProgress::new();

    let vocabulary = update_word_progress_at(&vocabulary, "apple", true, now);
    let word = &vocabulary["apple"];
    assert_eq!(word.familiarity, 1);
    assert_eq!(word.review_count, 1);
    assert_eq!(word.correct_count, 1);
    assert_eq!(word.next_review, now + chrono::Duration::days(1));

    let vocabulary = update_word_progress_at(&vocabulary, "apple", false, now);
    let word = &vocabulary["apple"];
    assert_eq!(word.familiarity, 0);
    assert_eq!(word.review_count, 2);
    assert_eq!(word.correct_count, 1);
    assert_eq!(word.next_review, now);

    // Wrong answers never go below zero
    let vocabulary = update_word_progress_at(&vocabulary, "apple", false, now);
    assert_eq!(vocabulary["apple"].familiarity, 0);
}

#[test]
fn test_word_progress_caps_at_max() {
    let now = at(2024, 3, 1, 9);
    let mut vocabulary = VocabularyProgress::new();
    for _ in 0..8 {
        vocabulary = update_word_progress_at(&vocabulary, "river", true, now);
    }

    let word = &vocabulary["river"];
    assert_eq!(word.familiarity, MAX_FAMILIARITY);
    assert_eq!(word.next_review, now + chrono::Duration::days(30));
}

#[test]
fn test_review_intervals() {
    let days: Vec<i64> = (0..=7).map(review_interval_days).collect();
    assert_eq!(days, vec![0, 1, 3, 7, 14, 30, 30, 30]);
}

#[test]
fn test_word_back_at_zero_is_due_at_once() {
    let now = at(2024, 3, 1, 9);
    let word = WordProgress::new("apple", now)
        .reviewed(true, now)
        .reviewed(false, at(2024, 3, 2, 9));

    assert_eq!(word.familiarity, 0);
    assert_eq!(word.next_review, at(2024, 3, 2, 9));
    assert!(word.is_due(at(2024, 3, 2, 9)));
}

#[test]
fn test_due_and_new_words() {
    let words: Vec<String> = ["apple", "river", "cloud", "stone"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let now = at(2024, 3, 1, 9);

    let vocabulary = VocabularyProgress::new();
    let vocabulary = update_word_progress_at(&vocabulary, "apple", true, now);
    let vocabulary = update_word_progress_at(&vocabulary, "river", false, now);

    // apple is due tomorrow, river immediately, the others were never seen
    assert_eq!(due_for_review(&words, &vocabulary, now), vec!["river", "cloud", "stone"]);
    assert_eq!(
        due_for_review(&words, &vocabulary, now + chrono::Duration::days(1)),
        vec!["apple", "river", "cloud", "stone"]
    );

    assert_eq!(new_words(&words, &vocabulary, 10), vec!["cloud", "stone"]);
    assert_eq!(new_words(&words, &vocabulary, 1), vec!["cloud"]);
}

#[test]
fn test_vocabulary_stats() {
    let now = at(2024, 3, 1, 9);
    let mut vocabulary = VocabularyProgress::new();
    for _ in 0..4 {
        vocabulary = update_word_progress_at(&vocabulary, "apple", true, now);
    }
    vocabulary = update_word_progress_at(&vocabulary, "river", true, now);
    vocabulary = update_word_progress_at(&vocabulary, "cloud", false, now);

    let stats = vocabulary_stats(100, &vocabulary);
    assert_eq!(
        stats,
        VocabularyStats {
            total_words: 100,
            mastered_words: 1,
            learning_words: 1,
        }
    );
}

#[test]
fn test_word_progress_json() {
    let vocabulary = update_word_progress_at(&VocabularyProgress::new(), "apple", true, at(2024, 3, 1, 9));
    let json = serde_json::to_value(&vocabulary).unwrap();

    assert_eq!(json["apple"]["wordId"], "apple");
    assert_eq!(json["apple"]["reviewCount"], 1);

    let restored: VocabularyProgress = serde_json::from_value(json).unwrap();
    assert_eq!(restored, vocabulary);
}

#[test]
fn test_memory_store_round_trip() {
    let mut store = MemoryStore::new();
    assert_eq!(load_progress(&store, STORAGE_KEY, DEFAULT_MODULES), LearningProgress::default());

    let progress = mark_item_complete_at(&LearningProgress::default(), "a", at(2024, 3, 1, 9));
    save_progress(&mut store, STORAGE_KEY, &progress).unwrap();

    assert_eq!(load_progress(&store, STORAGE_KEY, DEFAULT_MODULES), progress);
    assert_eq!(load_progress(&store, "other-key", DEFAULT_MODULES), LearningProgress::default());
}

#[test]
fn test_load_corrupt_falls_back_to_default() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, "{{{".to_string()).unwrap();
    assert_eq!(load_progress(&store, STORAGE_KEY, DEFAULT_MODULES), LearningProgress::default());

    assert_eq!(load_progress(&BrokenStore, STORAGE_KEY, DEFAULT_MODULES), LearningProgress::default());
}

#[test]
fn test_load_tracks_extra_modules() {
    let store = MemoryStore::new();
    let progress = load_progress(&store, STORAGE_KEY, ["theory", "rhythm"]);
    assert_eq!(progress.module_progress["rhythm"], 0);
    assert_eq!(progress.module_progress["chords"], 0);
}

#[test]
fn test_save_failure_is_reported() {
    let result = save_progress(&mut BrokenStore, STORAGE_KEY, &LearningProgress::default());
    assert_eq!(result, Err(MuseError::Storage("quota exceeded".to_string())));
}

#[test]
fn test_reset_progress_overwrites_store() {
    let mut store = MemoryStore::new();
    let progress = mark_item_complete_at(&LearningProgress::default(), "a", at(2024, 3, 1, 9));
    save_progress(&mut store, STORAGE_KEY, &progress).unwrap();

    let fresh = reset_progress(&mut store, STORAGE_KEY).unwrap();
    assert_eq!(fresh, LearningProgress::default());
    assert_eq!(load_progress(&store, STORAGE_KEY, DEFAULT_MODULES), fresh);
}
