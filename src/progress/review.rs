//! Spaced review scheduling for vocabulary
//!
//! Each word carries a familiarity level from 0 to 5. A correct answer moves
//! it up one level, a wrong answer down one, and the level picks how many days
//! pass before the word is due again.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Highest familiarity level
pub const MAX_FAMILIARITY: u8 = 5;

/// Days until the next review, indexed by familiarity
pub const REVIEW_INTERVALS: [i64; 6] = [0, 1, 3, 7, 14, 30];

/// Familiarity at which a word counts as mastered
pub const MASTERED_FAMILIARITY: u8 = 4;

/// Review history of one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    pub word_id: String,
    pub familiarity: u8,
    pub last_reviewed: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
    pub review_count: u32,
    pub correct_count: u32,
}

impl WordProgress {
    /// A word seen for the first time, due immediately
    pub fn new(word_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            word_id: word_id.to_string(),
            familiarity: 0,
            last_reviewed: now,
            next_review: now,
            review_count: 0,
            correct_count: 0,
        }
    }

    /// Apply one answer given at `now`
    pub fn reviewed(mut self, correct: bool, now: DateTime<Utc>) -> Self {
        self.review_count += 1;
        if correct {
            self.correct_count += 1;
            self.familiarity = (self.familiarity + 1).min(MAX_FAMILIARITY);
        } else {
            self.familiarity = self.familiarity.saturating_sub(1);
        }
        self.last_reviewed = now;
        self.next_review = now + Duration::days(review_interval_days(self.familiarity));
        self
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// Review state of every word a learner has seen, keyed by word id
pub type VocabularyProgress = BTreeMap<String, WordProgress>;

/// Word counts for the vocabulary dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyStats {
    pub total_words: usize,
    /// Familiarity 4 or 5
    pub mastered_words: usize,
    /// Familiarity 1 to 3; words back at 0 are neither
    pub learning_words: usize,
}

/// Days before a word at `familiarity` is due again. Levels above the table
/// use the longest interval.
///
/// Familiarity 0 maps to 0 days, so a word that drops back to 0 is due again
/// at once. Older browser builds of the trainer treated a 0 interval as
/// missing and scheduled those words 30 days out; this table does not.
pub fn review_interval_days(familiarity: u8) -> i64 {
    REVIEW_INTERVALS
        .get(familiarity as usize)
        .copied()
        .unwrap_or(REVIEW_INTERVALS[REVIEW_INTERVALS.len() - 1])
}

/// Record an answer for `word_id`, creating its entry on first review
pub fn update_word_progress(
    vocabulary: &VocabularyProgress,
    word_id: &str,
    correct: bool,
) -> VocabularyProgress {
    update_word_progress_at(vocabulary, word_id, correct, Utc::now())
}

pub fn update_word_progress_at(
    vocabulary: &VocabularyProgress,
    word_id: &str,
    correct: bool,
    now: DateTime<Utc>,
) -> VocabularyProgress {
    let current = vocabulary
        .get(word_id)
        .cloned()
        .unwrap_or_else(|| WordProgress::new(word_id, now));

    let mut next = vocabulary.clone();
    next.insert(word_id.to_string(), current.reviewed(correct, now));
    next
}

/// Words to review at `now`: never-seen words and words whose review date has passed
pub fn due_for_review<'a>(
    word_ids: &'a [String],
    vocabulary: &VocabularyProgress,
    now: DateTime<Utc>,
) -> Vec<&'a str> {
    word_ids
        .iter()
        .filter(|id| vocabulary.get(id.as_str()).is_none_or(|p| p.is_due(now)))
        .map(String::as_str)
        .collect()
}

/// Up to `count` words that have never been reviewed, in list order
pub fn new_words<'a>(
    word_ids: &'a [String],
    vocabulary: &VocabularyProgress,
    count: usize,
) -> Vec<&'a str> {
    word_ids
        .iter()
        .filter(|id| !vocabulary.contains_key(id.as_str()))
        .take(count)
        .map(String::as_str)
        .collect()
}

pub fn vocabulary_stats(total_words: usize, vocabulary: &VocabularyProgress) -> VocabularyStats {
    let mastered_words = vocabulary
        .values()
        .filter(|p| p.familiarity >= MASTERED_FAMILIARITY)
        .count();
    let learning_words = vocabulary
        .values()
        .filter(|p| (1..MASTERED_FAMILIARITY).contains(&p.familiarity))
        .count();

    VocabularyStats {
        total_words,
        mastered_words,
        learning_words,
    }
}
