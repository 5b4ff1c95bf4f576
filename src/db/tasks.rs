//! Task CRUD and the list ordering contract.

use super::{Database, encode_datetime, now_utc};
use crate::error::{StoreError, StoreResult};
use crate::types::{NewTask, Priority, Task, TaskPatch};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Row, ToSql, params};
use tracing::debug;

/// Display ordering shared by every list read: pending before completed,
/// undated before dated, dated ascending by deadline, deadline ties broken by
/// descending priority. The presentation layer renders this sequence without
/// re-sorting.
const LIST_SQL: &str = "SELECT * FROM tasks
     ORDER BY is_completed,
              (CASE WHEN deadline IS NULL THEN 0 ELSE 1 END),
              deadline,
              (CASE priority WHEN 'High' THEN 0 WHEN 'Medium' THEN 1 ELSE 2 END)";

/// Decode a row into a `Task`.
///
/// deadline and completed_at decode leniently (malformed text reads as
/// absent, so such rows simply drop out of date filters and duration
/// aggregation). created_at is strict: the store writes every row, so a
/// malformed creation timestamp means the database itself is damaged.
pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let deadline: Option<String> = row.get("deadline")?;
    let priority: String = row.get("priority")?;
    let progress: i64 = row.get("progress")?;
    let created_at: String = row.get("created_at")?;
    let completed_at: Option<String> = row.get("completed_at")?;

    let created_at: NaiveDateTime = created_at
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        deadline: deadline.as_deref().and_then(super::decode_date),
        priority: Priority::parse(&priority),
        progress: progress.clamp(0, 100) as u8,
        is_completed: row.get("is_completed")?,
        created_at,
        completed_at: completed_at.as_deref().and_then(super::decode_datetime),
        notified: row.get("notified")?,
    })
}

impl Database {
    /// Create a new task.
    ///
    /// Rejects a title that trims to empty. The record is persisted with the
    /// current UTC timestamp, completion cleared, and progress clamped to
    /// 100. Creating at progress 100 does not mark the task complete; only
    /// the edit boundary and `set_completion` do that.
    pub fn create_task(&self, input: NewTask) -> StoreResult<Task> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::empty_title());
        }

        let now = now_utc();
        let progress = input.progress.min(100);

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, deadline, priority, progress, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    title,
                    input.description,
                    input.deadline.map(|d| d.to_string()),
                    input.priority.as_str(),
                    progress,
                    encode_datetime(now),
                ],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, %title, "task created");

            Ok(Task {
                id,
                title,
                description: input.description,
                deadline: input.deadline,
                priority: input.priority,
                progress,
                is_completed: false,
                created_at: now,
                completed_at: None,
                notified: false,
            })
        })
    }

    /// All tasks in display order.
    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(LIST_SQL)?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Get a task by id.
    pub fn get_task(&self, id: i64) -> StoreResult<Option<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

            match stmt.query_row(params![id], parse_task_row) {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Apply a partial update. Only supplied fields are touched, in a single
    /// UPDATE statement. An empty patch and a missing id are both harmless
    /// no-ops.
    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref title) = patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(StoreError::empty_title());
            }
            assignments.push("title = ?");
            values.push(Box::new(title.to_string()));
        }
        if let Some(ref description) = patch.description {
            assignments.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(ref deadline) = patch.deadline {
            assignments.push("deadline = ?");
            values.push(Box::new(deadline.map(|d| d.to_string())));
        }
        if let Some(priority) = patch.priority {
            assignments.push("priority = ?");
            values.push(Box::new(priority.as_str()));
        }
        if let Some(progress) = patch.progress {
            assignments.push("progress = ?");
            values.push(Box::new(progress.min(100)));
        }
        if let Some(is_completed) = patch.is_completed {
            assignments.push("is_completed = ?");
            values.push(Box::new(is_completed));
        }
        if let Some(ref completed_at) = patch.completed_at {
            assignments.push("completed_at = ?");
            values.push(Box::new(completed_at.map(encode_datetime)));
        }

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", assignments.join(", "));
        values.push(Box::new(id));

        self.with_conn(|conn| {
            let bound: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
            let changed = conn.execute(&sql, &bound[..])?;
            debug!(id, changed, "task updated");
            Ok(())
        })
    }

    /// Full-form edit boundary. This is where progress couples to completion:
    /// a progress of 100 also marks the task complete and stamps
    /// completed_at, while progress below 100 leaves the completion state
    /// alone. Reverting completion goes through `set_completion(id, false)`.
    pub fn edit_task(&self, id: i64, mut patch: TaskPatch) -> StoreResult<()> {
        if patch.progress.map(|p| p.min(100)) == Some(100) {
            patch.is_completed = Some(true);
            patch.completed_at = Some(Some(now_utc()));
        }
        self.update_task(id, &patch)
    }

    /// Permanently delete a task. Removing an id that does not exist is a
    /// no-op, not an error.
    pub fn delete_task(&self, id: i64) -> StoreResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            debug!(id, changed, "task deleted");
            Ok(())
        })
    }

    /// Dedicated completion toggle, distinct from `update_task`.
    ///
    /// Completing forces progress to 100 and stamps completed_at; reverting
    /// resets progress to 0 and clears it. Each direction is a single
    /// statement; a missing id is a no-op.
    pub fn set_completion(&self, id: i64, completed: bool) -> StoreResult<()> {
        self.with_conn(|conn| {
            let changed = if completed {
                conn.execute(
                    "UPDATE tasks SET is_completed = 1, progress = 100, completed_at = ?1
                     WHERE id = ?2",
                    params![encode_datetime(now_utc()), id],
                )?
            } else {
                conn.execute(
                    "UPDATE tasks SET is_completed = 0, progress = 0, completed_at = NULL
                     WHERE id = ?1",
                    params![id],
                )?
            };
            debug!(id, completed, changed, "completion toggled");
            Ok(())
        })
    }
}
