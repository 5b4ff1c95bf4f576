//! Integration tests for the task store.
//!
//! These tests verify create/list/update/delete/completion behavior against
//! an in-memory SQLite database, plus one on-disk reopen check.

use chrono::{Days, Utc};
use taskdeck::db::Database;
use taskdeck::error::StoreError;
use taskdeck::types::{NewTask, Priority, TaskPatch};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        ..NewTask::default()
    }
}

mod create_tests {
    use super::*;

    #[test]
    fn create_assigns_unique_monotonic_ids() {
        let db = setup_db();

        let a = db.create_task(new_task("first")).unwrap();
        let b = db.create_task(new_task("second")).unwrap();
        let c = db.create_task(new_task("third")).unwrap();

        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn create_sets_defaults() {
        let db = setup_db();

        let task = db.create_task(new_task("defaults")).unwrap();

        assert!(!task.is_completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.progress, 0);
        assert!(!task.notified);

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert_eq!(stored, task);
    }

    #[test]
    fn create_rejects_empty_title() {
        let db = setup_db();

        let result = db.create_task(new_task(""));

        assert!(matches!(result, Err(StoreError::Validation { .. })));
        assert!(db.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn create_rejects_whitespace_only_title() {
        let db = setup_db();

        let result = db.create_task(new_task("   \t  "));

        assert!(matches!(result, Err(StoreError::Validation { .. })));
        assert!(db.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn create_trims_title() {
        let db = setup_db();

        let task = db.create_task(new_task("  trimmed  ")).unwrap();

        assert_eq!(task.title, "trimmed");
    }

    #[test]
    fn create_clamps_progress_to_100() {
        let db = setup_db();

        let task = db
            .create_task(NewTask {
                progress: 250,
                ..new_task("overshoot")
            })
            .unwrap();

        assert_eq!(task.progress, 100);
    }

    #[test]
    fn create_at_full_progress_does_not_complete() {
        let db = setup_db();

        let task = db
            .create_task(NewTask {
                progress: 100,
                ..new_task("already done?")
            })
            .unwrap();

        assert!(!task.is_completed);
        assert!(task.completed_at.is_none());
    }
}

mod completion_tests {
    use super::*;

    #[test]
    fn complete_sets_progress_and_timestamp() {
        let db = setup_db();
        let task = db.create_task(new_task("finish me")).unwrap();

        db.set_completion(task.id, true).unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.progress, 100);
        assert!(stored.completed_at.is_some());
    }

    #[test]
    fn revert_clears_progress_and_timestamp() {
        let db = setup_db();
        let task = db.create_task(new_task("on and off")).unwrap();
        db.set_completion(task.id, true).unwrap();

        db.set_completion(task.id, false).unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert!(!stored.is_completed);
        assert_eq!(stored.progress, 0);
        assert!(stored.completed_at.is_none());
    }

    #[test]
    fn completion_of_missing_id_is_noop() {
        let db = setup_db();
        db.create_task(new_task("bystander")).unwrap();

        db.set_completion(9999, true).unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].is_completed);
    }
}

mod ordering_tests {
    use super::*;

    #[test]
    fn undated_incomplete_precedes_dated_incomplete() {
        let db = setup_db();
        let today = Utc::now().date_naive();

        let dated = db
            .create_task(NewTask {
                deadline: Some(today),
                ..new_task("dated")
            })
            .unwrap();
        let undated = db.create_task(new_task("undated")).unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks[0].id, undated.id);
        assert_eq!(tasks[1].id, dated.id);
    }

    #[test]
    fn completed_tasks_come_last() {
        let db = setup_db();

        let done = db.create_task(new_task("done")).unwrap();
        let pending = db.create_task(new_task("pending")).unwrap();
        db.set_completion(done.id, true).unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks[0].id, pending.id);
        assert_eq!(tasks[1].id, done.id);
    }

    #[test]
    fn dated_tasks_sort_by_ascending_deadline() {
        let db = setup_db();
        let today = Utc::now().date_naive();

        let later = db
            .create_task(NewTask {
                deadline: Some(today + Days::new(5)),
                ..new_task("later")
            })
            .unwrap();
        let sooner = db
            .create_task(NewTask {
                deadline: Some(today + Days::new(1)),
                ..new_task("sooner")
            })
            .unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks[0].id, sooner.id);
        assert_eq!(tasks[1].id, later.id);
    }

    #[test]
    fn deadline_ties_break_by_descending_priority() {
        let db = setup_db();
        let deadline = Some(Utc::now().date_naive() + Days::new(2));

        let low = db
            .create_task(NewTask {
                deadline,
                priority: Priority::Low,
                ..new_task("low")
            })
            .unwrap();
        let high = db
            .create_task(NewTask {
                deadline,
                priority: Priority::High,
                ..new_task("high")
            })
            .unwrap();
        let medium = db
            .create_task(NewTask {
                deadline,
                priority: Priority::Medium,
                ..new_task("medium")
            })
            .unwrap();

        let ids: Vec<i64> = db.list_tasks().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![high.id, medium.id, low.id]);
    }

    #[test]
    fn completed_tasks_keep_the_secondary_ordering() {
        let db = setup_db();
        let today = Utc::now().date_naive();

        let done_dated = db
            .create_task(NewTask {
                deadline: Some(today),
                ..new_task("done dated")
            })
            .unwrap();
        let done_undated = db.create_task(new_task("done undated")).unwrap();
        let pending = db.create_task(new_task("pending")).unwrap();
        db.set_completion(done_dated.id, true).unwrap();
        db.set_completion(done_undated.id, true).unwrap();

        let ids: Vec<i64> = db.list_tasks().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![pending.id, done_undated.id, done_dated.id]);
    }
}

mod patch_tests {
    use super::*;

    #[test]
    fn empty_patch_is_a_noop() {
        let db = setup_db();
        let task = db.create_task(new_task("unchanged")).unwrap();

        db.update_task(task.id, &TaskPatch::default()).unwrap();

        assert_eq!(db.get_task(task.id).unwrap().unwrap(), task);
    }

    #[test]
    fn patch_touches_only_supplied_fields() {
        let db = setup_db();
        let task = db
            .create_task(NewTask {
                description: Some("old text".to_string()),
                priority: Priority::High,
                ..new_task("partial")
            })
            .unwrap();

        db.update_task(
            task.id,
            &TaskPatch {
                title: Some("renamed".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(stored.description.as_deref(), Some("old text"));
        assert_eq!(stored.priority, Priority::High);
    }

    #[test]
    fn patch_can_clear_deadline() {
        let db = setup_db();
        let task = db
            .create_task(NewTask {
                deadline: Some(Utc::now().date_naive()),
                ..new_task("dated")
            })
            .unwrap();

        db.update_task(
            task.id,
            &TaskPatch {
                deadline: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        assert!(db.get_task(task.id).unwrap().unwrap().deadline.is_none());
    }

    #[test]
    fn patch_rejects_whitespace_title() {
        let db = setup_db();
        let task = db.create_task(new_task("keep me")).unwrap();

        let result = db.update_task(
            task.id,
            &TaskPatch {
                title: Some("  ".to_string()),
                ..TaskPatch::default()
            },
        );

        assert!(matches!(result, Err(StoreError::Validation { .. })));
        assert_eq!(db.get_task(task.id).unwrap().unwrap().title, "keep me");
    }

    #[test]
    fn patch_of_missing_id_is_noop() {
        let db = setup_db();
        db.create_task(new_task("bystander")).unwrap();

        db.update_task(
            404,
            &TaskPatch {
                title: Some("ghost".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "bystander");
    }

    #[test]
    fn raw_patch_to_full_progress_does_not_complete() {
        let db = setup_db();
        let task = db.create_task(new_task("raw")).unwrap();

        db.update_task(
            task.id,
            &TaskPatch {
                progress: Some(100),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert_eq!(stored.progress, 100);
        assert!(!stored.is_completed);
    }
}

mod edit_tests {
    use super::*;

    #[test]
    fn edit_to_full_progress_completes() {
        let db = setup_db();
        let task = db.create_task(new_task("almost there")).unwrap();

        db.edit_task(
            task.id,
            TaskPatch {
                progress: Some(100),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.progress, 100);
        assert!(stored.completed_at.is_some());
    }

    #[test]
    fn edit_below_full_progress_keeps_completion() {
        let db = setup_db();
        let task = db.create_task(new_task("sticky")).unwrap();
        db.set_completion(task.id, true).unwrap();

        db.edit_task(
            task.id,
            TaskPatch {
                progress: Some(40),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.progress, 40);
        assert!(stored.completed_at.is_some());
    }

    #[test]
    fn edit_without_progress_leaves_completion_alone() {
        let db = setup_db();
        let task = db.create_task(new_task("rename only")).unwrap();

        db.edit_task(
            task.id,
            TaskPatch {
                title: Some("renamed".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let stored = db.get_task(task.id).unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert!(!stored.is_completed);
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn delete_removes_the_task() {
        let db = setup_db();
        let task = db.create_task(new_task("doomed")).unwrap();

        db.delete_task(task.id).unwrap();

        assert!(db.get_task(task.id).unwrap().is_none());
        assert!(db.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn delete_of_missing_id_leaves_store_unchanged() {
        let db = setup_db();
        let task = db.create_task(new_task("survivor")).unwrap();

        db.delete_task(9999).unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn tasks_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        let id = {
            let db = Database::open(&path).unwrap();
            db.create_task(new_task("durable")).unwrap().id
        };

        let db = Database::open(&path).unwrap();
        let stored = db.get_task(id).unwrap().unwrap();
        assert_eq!(stored.title, "durable");
    }
}

#[test]
fn create_complete_summary_scenario() {
    let db = setup_db();
    let tomorrow = Utc::now().date_naive() + Days::new(1);

    let t1 = db
        .create_task(NewTask {
            title: "Write report".to_string(),
            priority: Priority::High,
            deadline: Some(tomorrow),
            ..NewTask::default()
        })
        .unwrap();

    let tasks = db.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, t1.id);

    db.set_completion(t1.id, true).unwrap();

    let summary = taskdeck::stats::summary(&db.list_tasks().unwrap());
    assert_eq!(summary.total, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.completion_rate, 1.0);
}
