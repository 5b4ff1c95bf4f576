//! taskdeck CLI entry point.

use anyhow::Result;
use clap::Parser;
use taskdeck::cli::{Cli, Command};
use taskdeck::config::Config;
use taskdeck::db::Database;
use taskdeck::filter::{TaskFilter, filter_tasks};
use taskdeck::format;
use taskdeck::stats;
use taskdeck::types::{NewTask, Priority, TaskPatch};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(ref database) = cli.database {
        config.db_path = database.clone();
    }
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    debug!(db = %config.db_path.display(), "opening database");
    let db = Database::open(&config.db_path)?;
    let json = cli.json;

    match cli.command {
        Command::Add {
            title,
            description,
            deadline,
            priority,
            progress,
        } => {
            let task = db.create_task(NewTask {
                title,
                description,
                deadline,
                priority: priority.unwrap_or(config.default_priority),
                progress,
            })?;
            if json {
                print_json(&task)?;
            } else {
                println!("Added task #{}", task.id);
                println!("{}", format::format_task_line(&task));
            }
        }

        Command::List {
            hide_completed,
            priority,
            due,
        } => {
            let filter = TaskFilter {
                show_completed: !hide_completed,
                priorities: if priority.is_empty() {
                    Priority::ALL.to_vec()
                } else {
                    priority
                },
                due,
            };
            let today = chrono::Utc::now().date_naive();
            let tasks = filter_tasks(&db.list_tasks()?, &filter, today);

            if json {
                print_json(&tasks)?;
            } else if tasks.is_empty() {
                println!("No tasks match the current filters.");
            } else {
                println!("Tasks ({})", tasks.len());
                for task in &tasks {
                    println!("{}", format::format_task_line(task));
                }
            }
        }

        Command::Edit {
            id,
            title,
            description,
            deadline,
            clear_deadline,
            priority,
            progress,
        } => {
            if db.get_task(id)?.is_none() {
                anyhow::bail!("task #{id} not found");
            }
            let patch = TaskPatch {
                title,
                description: description.map(Some),
                deadline: if clear_deadline {
                    Some(None)
                } else {
                    deadline.map(Some)
                },
                priority,
                progress,
                ..TaskPatch::default()
            };
            db.edit_task(id, patch)?;
            report_task(json, &db, id, "Updated")?;
        }

        Command::Done { id } => {
            db.set_completion(id, true)?;
            report_task(json, &db, id, "Completed")?;
        }

        Command::Undo { id } => {
            db.set_completion(id, false)?;
            report_task(json, &db, id, "Reverted")?;
        }

        Command::Delete { id } => {
            db.delete_task(id)?;
            if json {
                print_json(&serde_json::json!({ "deleted": id }))?;
            } else {
                println!("Deleted task #{id}");
            }
        }

        Command::Stats => {
            let tasks = db.list_tasks()?;
            let summary = stats::summary(&tasks);
            let average = stats::average_completion_duration(&tasks);
            let by_priority = stats::priority_distribution(&tasks);
            let by_status = stats::status_distribution(&tasks);

            if json {
                print_json(&serde_json::json!({
                    "summary": summary,
                    "average_completion_seconds": average.map(|d| d.num_seconds()),
                    "by_priority": by_priority,
                    "by_status": by_status,
                }))?;
            } else {
                print!("{}", format::format_stats(&summary, average, &by_priority, &by_status));
            }
        }
    }

    Ok(())
}

/// Print the task after a mutation, or a warning when the id never existed
/// (mutations on missing ids are store-level no-ops).
fn report_task(json: bool, db: &Database, id: i64, verb: &str) -> Result<()> {
    match db.get_task(id)? {
        Some(ref task) if json => print_json(task)?,
        Some(ref task) => {
            println!("{verb} task #{id}");
            println!("{}", format::format_task_line(task));
        }
        None => println!("Task #{id} does not exist; nothing changed."),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
