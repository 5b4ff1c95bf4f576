//! CLI command definitions for taskdeck.
//!
//! The CLI is the presentation layer: it collects user input, calls the
//! store/filter/stats APIs, and renders the results. It never sorts and
//! never applies business rules of its own.

use crate::types::{DueBucket, Priority};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Personal task tracker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Longer description (may be multi-line)
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Deadline date (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<NaiveDate>,

        /// Priority (defaults to the configured default)
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,

        /// Initial completion percentage
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,
    },

    /// List tasks in display order
    List {
        /// Hide completed tasks
        #[arg(long)]
        hide_completed: bool,

        /// Only show these priorities (repeatable; default: all)
        #[arg(short, long, value_enum)]
        priority: Vec<Priority>,

        /// Due-date bucket
        #[arg(long, value_enum, default_value = "all")]
        due: DueBucket,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// New deadline date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "clear_deadline")]
        deadline: Option<NaiveDate>,

        /// Remove the deadline
        #[arg(long)]
        clear_deadline: bool,

        /// New priority
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,

        /// New completion percentage (100 marks the task complete)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
    },

    /// Mark a task complete
    Done {
        /// Task id
        id: i64,
    },

    /// Revert a completed task to pending
    Undo {
        /// Task id
        id: i64,
    },

    /// Delete a task permanently
    Delete {
        /// Task id
        id: i64,
    },

    /// Show summary metrics and distributions
    Stats,
}
