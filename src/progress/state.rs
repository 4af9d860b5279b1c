//! Learning progress record and its state transitions
//!
//! Every transition borrows the current record and returns a new one; nothing
//! here reads the clock except the plain (non-`_at`) wrappers.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::stats::calculate_progress_percentage;
use crate::error::MuseError;

/// Modules every progress record tracks, in display order
pub const DEFAULT_MODULES: [&str; 4] = ["theory", "chords", "production", "earTraining"];

/// Format of `last_study_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How many results [`recent_results`] returns when asked for the usual page
pub const RECENT_RESULTS: usize = 10;

/// One answered training question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Question category, e.g. `interval`, `chord` or `rhythm`
    #[serde(rename = "questionType")]
    pub category: String,
    pub correct: bool,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Everything persisted about one learner
///
/// Serialized field names match the stored JSON layout:
/// `completedKnowledgePoints`, `earTrainingResults`, `lastStudyDate`,
/// `streak`, `moduleProgress`. Fields missing from stored data take their
/// default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningProgress {
    #[serde(rename = "completedKnowledgePoints")]
    pub completed: BTreeSet<String>,
    #[serde(rename = "earTrainingResults")]
    pub results: Vec<TrainingResult>,
    /// `YYYY-MM-DD`, or empty when the learner has never studied
    #[serde(rename = "lastStudyDate")]
    pub last_study_date: String,
    pub streak: u32,
    /// Module name to percentage complete (0-100)
    #[serde(rename = "moduleProgress")]
    pub module_progress: BTreeMap<String, u32>,
}

impl Default for LearningProgress {
    fn default() -> Self {
        Self {
            completed: BTreeSet::new(),
            results: Vec::new(),
            last_study_date: String::new(),
            streak: 0,
            module_progress: BTreeMap::new(),
        }
        .track_modules(DEFAULT_MODULES)
    }
}

impl LearningProgress {
    /// A fresh record: nothing completed, no streak, every module at 0
    pub fn reset() -> Self {
        Self::default()
    }

    /// Add any of `modules` not already tracked, at 0%. Existing values are kept.
    pub fn track_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for module in modules {
            self.module_progress
                .entry(module.as_ref().to_string())
                .or_insert(0);
        }
        self
    }

    /// Record a study action on `today`: set the date and recompute the streak
    fn studied_on(mut self, today: NaiveDate) -> Self {
        self.streak = calculate_streak(&self.last_study_date, self.streak, today);
        self.last_study_date = today.format(DATE_FORMAT).to_string();
        self
    }
}

/// Streak after studying on `today`, given the previous study date and streak.
///
/// | last study date        | result              |
/// |------------------------|---------------------|
/// | empty (never studied)  | 1                   |
/// | `today`                | `max(current, 1)`   |
/// | the day before `today` | `current + 1`       |
/// | anything else          | 1                   |
///
/// "Anything else" covers gaps of two or more days, a date after `today`
/// (clock skew) and a date that does not parse. A record restored with a
/// date but no streak counts a same-day study as day one.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use muselab::progress::calculate_streak;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(calculate_streak("", 0, today), 1);
/// assert_eq!(calculate_streak("2024-02-29", 4, today), 5);
/// assert_eq!(calculate_streak("2024-03-01", 0, today), 1);
/// assert_eq!(calculate_streak("2024-02-27", 4, today), 1);
/// ```
pub fn calculate_streak(last_study_date: &str, current_streak: u32, today: NaiveDate) -> u32 {
    if last_study_date.is_empty() {
        return 1;
    }

    match NaiveDate::parse_from_str(last_study_date, DATE_FORMAT) {
        Ok(last) if last == today => current_streak.max(1),
        Ok(last) if today.pred_opt() == Some(last) => current_streak.saturating_add(1),
        _ => 1,
    }
}

/// Mark `item_id` complete. Marking an item twice changes nothing, not even
/// the streak.
pub fn mark_item_complete(progress: &LearningProgress, item_id: &str) -> LearningProgress {
    mark_item_complete_at(progress, item_id, Utc::now())
}

pub fn mark_item_complete_at(
    progress: &LearningProgress,
    item_id: &str,
    now: DateTime<Utc>,
) -> LearningProgress {
    if progress.completed.contains(item_id) {
        return progress.clone();
    }

    let mut next = progress.clone();
    next.completed.insert(item_id.to_string());
    next.studied_on(now.date_naive())
}

/// Append a training answer stamped with the current time
pub fn add_training_result(
    progress: &LearningProgress,
    category: &str,
    correct: bool,
) -> LearningProgress {
    add_training_result_at(progress, category, correct, Utc::now())
}

pub fn add_training_result_at(
    progress: &LearningProgress,
    category: &str,
    correct: bool,
    now: DateTime<Utc>,
) -> LearningProgress {
    let mut next = progress.clone();
    next.results.push(TrainingResult {
        category: category.to_string(),
        correct,
        timestamp: now.timestamp_millis(),
    });
    next.studied_on(now.date_naive())
}

/// Set `module` to `completed / total` as a percentage. Does not count as
/// studying, so the streak is untouched.
pub fn update_module_progress(
    progress: &LearningProgress,
    module: &str,
    completed: usize,
    total: usize,
) -> LearningProgress {
    let mut next = progress.clone();
    next.module_progress.insert(
        module.to_string(),
        calculate_progress_percentage(completed, total),
    );
    next
}

pub fn is_item_completed(progress: &LearningProgress, item_id: &str) -> bool {
    progress.completed.contains(item_id)
}

/// The last `count` training results, newest first
pub fn recent_results(progress: &LearningProgress, count: usize) -> Vec<&TrainingResult> {
    progress.results.iter().rev().take(count).collect()
}

pub fn serialize_progress(progress: &LearningProgress) -> Result<String, MuseError> {
    serde_json::to_string(progress).map_err(|e| MuseError::InvalidProgressData(e.to_string()))
}

/// Parse a stored progress blob.
///
/// Missing fields and missing module keys are filled with defaults, so data
/// written before a module existed still loads. Anything that is not a JSON
/// object of the right shape fails with [`MuseError::InvalidProgressData`].
///
/// # Examples
/// ```
/// use muselab::progress::deserialize_progress;
///
/// let progress = deserialize_progress(r#"{"streak": 3, "moduleProgress": {"theory": 40}}"#).unwrap();
/// assert_eq!(progress.streak, 3);
/// assert_eq!(progress.module_progress["theory"], 40);
/// assert_eq!(progress.module_progress["chords"], 0);
///
/// assert!(deserialize_progress("not json").is_err());
/// ```
pub fn deserialize_progress(data: &str) -> Result<LearningProgress, MuseError> {
    let progress: LearningProgress = serde_json::from_str(data)
        .map_err(|e| MuseError::InvalidProgressData(e.to_string()))?;
    Ok(progress.track_modules(DEFAULT_MODULES))
}
