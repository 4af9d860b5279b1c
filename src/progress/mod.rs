//! # Progress Module
//!
//! Track what a learner has completed, how often they study and how well they
//! answer training questions.
//!
//! ## Purpose
//! The progress engine is a set of pure transitions over a [`LearningProgress`]
//! record. Each operation borrows the current record and returns a new one,
//! so hosts can call it from overlapping event handlers without locking; the
//! host owns the canonical copy and persists it through the `storage` adapter.
//!
//! ## Sub-modules
//! - `state` - The record, streak arithmetic, transitions, JSON persistence
//! - `stats` - Percentages, accuracy and the dashboard summary
//! - `review` - Spaced review scheduling for vocabulary words
//! - `storage` - `KeyValueStore` adapter for loading and saving the record
//!
//! ## Streaks
//! - The first study action ever starts a streak of 1
//! - Studying again the same day leaves the streak alone
//! - Studying the day after the last study day adds 1
//! - Any longer gap starts over at 1
//!
//! ## Clock
//! Date-dependent operations come in pairs: `mark_item_complete` reads the
//! system clock, `mark_item_complete_at` takes the time as an argument.
//!
//! ## Example
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use muselab::progress::{get_learning_statistics, mark_item_complete_at, LearningProgress};
//!
//! let day1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
//! let day2 = Utc.with_ymd_and_hms(2024, 3, 2, 20, 0, 0).unwrap();
//!
//! let progress = LearningProgress::default();
//! let progress = mark_item_complete_at(&progress, "intervals-basics", day1);
//! let progress = mark_item_complete_at(&progress, "triads", day2);
//!
//! let stats = get_learning_statistics(&progress, 8);
//! assert_eq!(stats.total_completed, 2);
//! assert_eq!(stats.streak, 2);
//! assert_eq!(stats.overall_progress, 25);
//! ```

mod review;
mod state;
mod stats;
mod storage;

#[cfg(test)]
mod tests;

pub use review::{
    due_for_review, new_words, review_interval_days, update_word_progress,
    update_word_progress_at, vocabulary_stats, VocabularyProgress, VocabularyStats, WordProgress,
    MASTERED_FAMILIARITY, MAX_FAMILIARITY, REVIEW_INTERVALS,
};
pub use state::{
    add_training_result, add_training_result_at, calculate_streak, deserialize_progress,
    is_item_completed, mark_item_complete, mark_item_complete_at, recent_results,
    serialize_progress, update_module_progress, LearningProgress, TrainingResult, DATE_FORMAT,
    DEFAULT_MODULES, RECENT_RESULTS,
};
pub use stats::{
    calculate_accuracy, calculate_progress_percentage, get_learning_statistics,
    LearningStatistics,
};
pub use storage::{
    load_progress, reset_progress, save_progress, KeyValueStore, MemoryStore, STORAGE_KEY,
};
