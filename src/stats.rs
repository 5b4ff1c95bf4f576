//! Aggregate metrics over task collections.
//!
//! Everything here is a pure function over a read-only snapshot; the numbers
//! feed the stats view and its two distributions.

use crate::types::{Priority, Status, Summary, Task};
use chrono::Duration;
use std::collections::BTreeMap;

/// Count totals and the completion rate. An empty collection yields a zero
/// rate rather than a division error.
pub fn summary(tasks: &[Task]) -> Summary {
    let total = tasks.len() as u64;
    let completed = tasks.iter().filter(|t| t.is_completed).count() as u64;
    let completion_rate = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };

    Summary {
        total,
        completed,
        pending: total - completed,
        completion_rate,
    }
}

/// Arithmetic mean of creation-to-completion time over tasks that carry a
/// completion timestamp, or `None` when no task qualifies. Tasks whose
/// stored timestamps failed to decode already read as incomplete, so they
/// drop out here without error.
pub fn average_completion_duration(tasks: &[Task]) -> Option<Duration> {
    let durations: Vec<Duration> = tasks
        .iter()
        .filter_map(|t| t.completed_at.map(|done| done - t.created_at))
        .collect();

    if durations.is_empty() {
        return None;
    }

    let total_secs: i64 = durations.iter().map(Duration::num_seconds).sum();
    Some(Duration::seconds(total_secs / durations.len() as i64))
}

/// Task counts keyed by priority. Every priority is present, zero-filled.
pub fn priority_distribution(tasks: &[Task]) -> BTreeMap<Priority, u64> {
    let mut counts: BTreeMap<Priority, u64> = Priority::ALL.iter().map(|p| (*p, 0)).collect();
    for task in tasks {
        *counts.entry(task.priority).or_default() += 1;
    }
    counts
}

/// Task counts keyed by completion status. Both keys are present, zero-filled.
pub fn status_distribution(tasks: &[Task]) -> BTreeMap<Status, u64> {
    let mut counts: BTreeMap<Status, u64> =
        BTreeMap::from([(Status::Pending, 0), (Status::Completed, 0)]);
    for task in tasks {
        *counts.entry(Status::from_completed(task.is_completed)).or_default() += 1;
    }
    counts
}
