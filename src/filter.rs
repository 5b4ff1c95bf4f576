//! In-memory filtering over task snapshots.
//!
//! The filter is a pure function: it never touches the store and never
//! reorders its input, so the store's display ordering survives filtering.
//! "Today" is passed in explicitly rather than read from the clock.

use crate::types::{DueBucket, Priority, Task};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Filter criteria applied to a task snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFilter {
    /// When false, completed tasks are dropped.
    pub show_completed: bool,
    /// Tasks whose priority is not listed are dropped.
    pub priorities: Vec<Priority>,
    pub due: DueBucket,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            show_completed: true,
            priorities: Priority::ALL.to_vec(),
            due: DueBucket::All,
        }
    }
}

impl TaskFilter {
    /// Whether a single task passes this filter.
    ///
    /// A task with no deadline only surfaces in the `All` bucket; the dated
    /// buckets have nothing to compare against.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.show_completed && task.is_completed {
            return false;
        }
        if !self.priorities.contains(&task.priority) {
            return false;
        }
        match self.due {
            DueBucket::All => true,
            DueBucket::Overdue => !task.is_completed && task.deadline.is_some_and(|d| d < today),
            DueBucket::Today => task.deadline.is_some_and(|d| d == today),
            DueBucket::Next7Days => task
                .deadline
                .is_some_and(|d| today <= d && d <= today + Days::new(7)),
        }
    }
}

/// Apply `filter` to `tasks`, preserving input order.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task, today))
        .cloned()
        .collect()
}
