//! Percentages and summary statistics

use std::collections::BTreeMap;

use serde::Serialize;

use super::state::{LearningProgress, TrainingResult};

/// Summary shown on a learner's dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStatistics {
    pub total_completed: usize,
    pub streak: u32,
    /// Completed items as a percentage of all items
    pub overall_progress: u32,
    /// Percentage of training answers that were correct, across all categories
    pub accuracy: u32,
    pub module_progress: BTreeMap<String, u32>,
}

/// `round(100 * completed / total)`, clamped to 0-100. Zero when `total` is 0.
///
/// ```
/// use muselab::progress::calculate_progress_percentage;
///
/// assert_eq!(calculate_progress_percentage(1, 3), 33);
/// assert_eq!(calculate_progress_percentage(2, 3), 67);
/// assert_eq!(calculate_progress_percentage(5, 0), 0);
/// ```
pub fn calculate_progress_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let percentage = (completed as f64 / total as f64 * 100.0).round();
    percentage.min(100.0) as u32
}

/// Percentage of correct answers, optionally only those in `category`.
/// Zero when nothing matches.
pub fn calculate_accuracy(results: &[TrainingResult], category: Option<&str>) -> u32 {
    let matching: Vec<&TrainingResult> = results
        .iter()
        .filter(|r| category.is_none_or(|c| r.category == c))
        .collect();

    let correct = matching.iter().filter(|r| r.correct).count();
    calculate_progress_percentage(correct, matching.len())
}

pub fn get_learning_statistics(progress: &LearningProgress, total_items: usize) -> LearningStatistics {
    LearningStatistics {
        total_completed: progress.completed.len(),
        streak: progress.streak,
        overall_progress: calculate_progress_percentage(progress.completed.len(), total_items),
        accuracy: calculate_accuracy(&progress.results, None),
        module_progress: progress.module_progress.clone(),
    }
}
