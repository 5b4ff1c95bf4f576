//! Core value types for the task store, filter engine, and aggregator.

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority. Display ordering breaks deadline ties by descending
/// priority (High before Medium before Low).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// The stored text form of the priority column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse the stored text form. Unrecognized values read as Low, matching
    /// the permissive treatment of the persisted column.
    pub fn parse(s: &str) -> Priority {
        match s {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted task record.
///
/// Records only ever enter storage through the store's own write paths, so
/// `completed_at.is_some()` always mirrors `is_completed` and `created_at`
/// never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Calendar date with no time component; `None` means "no deadline".
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
    /// Percent complete, in [0, 100].
    pub progress: u8,
    pub is_completed: bool,
    /// UTC, set once at creation.
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    /// Reserved for future notification delivery; never consumed.
    pub notified: bool,
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
    pub progress: u8,
}

/// A structured partial update.
///
/// `None` leaves a field untouched; for nullable columns the nested `Option`
/// distinguishes "clear the value" (`Some(None)`) from "keep it" (`None`).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub progress: Option<u8>,
    pub is_completed: Option<bool>,
    pub completed_at: Option<Option<NaiveDateTime>>,
}

impl TaskPatch {
    /// True when no field is set; applying such a patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.priority.is_none()
            && self.progress.is_none()
            && self.is_completed.is_none()
            && self.completed_at.is_none()
    }
}

/// Completion status, the key of the status distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub fn from_completed(is_completed: bool) -> Status {
        if is_completed {
            Status::Completed
        } else {
            Status::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named due-date range for filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    /// No date constraint.
    #[default]
    All,
    /// Deadline before today and not completed.
    Overdue,
    /// Deadline is today, completed or not.
    Today,
    /// Deadline within today..=today+7.
    #[value(name = "next7days")]
    Next7Days,
}

/// Aggregate counts over a task collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    /// completed / total; 0.0 for an empty collection.
    pub completion_rate: f64,
}
