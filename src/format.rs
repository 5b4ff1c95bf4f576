//! Human-readable rendering for CLI output.

use crate::types::{Priority, Status, Summary, Task};
use chrono::Duration;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Render a duration as its non-zero day/hour/minute parts, largest first;
/// anything under a minute collapses to "0 minutes". Negative durations
/// render their magnitude (the store never produces them).
pub fn human_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().abs();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    if days != 0 {
        parts.push(unit(days, "day"));
    }
    if hours != 0 {
        parts.push(unit(hours, "hour"));
    }
    if minutes != 0 {
        parts.push(unit(minutes, "minute"));
    }

    if parts.is_empty() {
        return "0 minutes".to_string();
    }
    parts.join(" ")
}

fn unit(n: i64, name: &str) -> String {
    if n == 1 {
        format!("1 {name}")
    } else {
        format!("{n} {name}s")
    }
}

/// Deadline for display: "05 Mar 2026" or "no deadline".
pub fn format_deadline(task: &Task) -> String {
    match task.deadline {
        Some(d) => d.format("%d %b %Y").to_string(),
        None => "no deadline".to_string(),
    }
}

/// One-line task rendering for list output.
pub fn format_task_line(task: &Task) -> String {
    let check = if task.is_completed { "x" } else { " " };
    let marker = match task.priority {
        Priority::High => "!!! ",
        Priority::Medium | Priority::Low => "",
    };

    format!(
        "[{check}] #{id} {marker}{title} ({priority}, {deadline}, {progress}%)",
        id = task.id,
        title = task.title,
        priority = task.priority,
        deadline = format_deadline(task),
        progress = task.progress,
    )
}

/// Multi-line stats view: summary metrics, average completion duration, and
/// the two distributions as text bars (standing in for the original pie
/// charts).
pub fn format_stats(
    summary: &Summary,
    average: Option<Duration>,
    by_priority: &BTreeMap<Priority, u64>,
    by_status: &BTreeMap<Status, u64>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Total tasks:     {}\n", summary.total));
    out.push_str(&format!(
        "Completed:       {} ({:.1}%)\n",
        summary.completed,
        summary.completion_rate * 100.0
    ));
    out.push_str(&format!("Pending:         {}\n", summary.pending));
    out.push_str(&format!(
        "Avg completion:  {}\n",
        average.map_or_else(|| "n/a".to_string(), human_duration)
    ));
    out.push('\n');
    out.push_str(&format_distribution("By priority", by_priority));
    out.push('\n');
    out.push_str(&format_distribution("By status", by_status));

    out
}

/// Text bar chart for a count distribution, widest bar pinned to 20 chars.
pub fn format_distribution<K: Display>(title: &str, counts: &BTreeMap<K, u64>) -> String {
    let mut out = format!("{title}\n");
    let max = counts.values().copied().max().unwrap_or(0);

    for (key, count) in counts {
        let width = if max == 0 {
            0
        } else {
            (count * 20 / max) as usize
        };
        out.push_str(&format!(
            "  {key:<10} {count:>4} {bar}\n",
            key = key.to_string(),
            bar = "#".repeat(width)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_renders_zero_minutes() {
        assert_eq!(human_duration(Duration::zero()), "0 minutes");
        assert_eq!(human_duration(Duration::seconds(59)), "0 minutes");
    }

    #[test]
    fn single_units_are_singular() {
        assert_eq!(human_duration(Duration::days(1)), "1 day");
        assert_eq!(human_duration(Duration::hours(1)), "1 hour");
        assert_eq!(human_duration(Duration::minutes(1)), "1 minute");
    }

    #[test]
    fn zero_valued_units_are_omitted() {
        assert_eq!(human_duration(Duration::minutes(24 * 60 + 5)), "1 day 5 minutes");
        assert_eq!(
            human_duration(Duration::minutes(2 * 24 * 60 + 3 * 60 + 30)),
            "2 days 3 hours 30 minutes"
        );
    }

    #[test]
    fn negative_duration_renders_magnitude() {
        assert_eq!(human_duration(Duration::hours(-2)), "2 hours");
    }
}
