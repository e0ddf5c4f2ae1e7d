//! Report aggregation: task counts grouped by user or project.
//!
//! Rows are one-to-one with the input grouping entities, zero-filled
//! when no tasks match, in the same order as the input. The rows carry
//! a fixed column order for the external CSV/export layer; the core
//! never serializes files itself.

use serde::Serialize;
use taskflow_model::{Project, Task, TaskStatus, User};

/// Task counts partitioned by status, plus the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Total matching tasks.
    pub total: usize,
    /// Tasks in `backlog`.
    pub backlog: usize,
    /// Tasks in `todo`.
    pub todo: usize,
    /// Tasks in `in_progress`.
    pub in_progress: usize,
    /// Tasks in `done`.
    pub done: usize,
    /// Tasks in `blocked`.
    pub blocked: usize,
}

impl StatusCounts {
    /// Tallies an iterator of tasks into per-status counts.
    fn tally<'a>(tasks: impl Iterator<Item = &'a Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts.total += 1;
            match task.status {
                TaskStatus::Backlog => counts.backlog += 1,
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
                TaskStatus::Blocked => counts.blocked += 1,
            }
        }
        counts
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn for_status(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Backlog => self.backlog,
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
            TaskStatus::Blocked => self.blocked,
        }
    }
}

/// One report row per user: their assigned-task counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserReportRow {
    /// User display name.
    pub name: String,
    /// User role, snake_case.
    pub role: String,
    /// Assigned-task counts by status.
    #[serde(flatten)]
    pub counts: StatusCounts,
}

impl UserReportRow {
    /// Column headers, in the guaranteed export order.
    pub const CSV_HEADER: [&'static str; 8] = [
        "name",
        "role",
        "total",
        "backlog",
        "todo",
        "in_progress",
        "done",
        "blocked",
    ];

    /// The row's fields as strings, matching [`Self::CSV_HEADER`] order.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.clone(),
            self.counts.total.to_string(),
            self.counts.backlog.to_string(),
            self.counts.todo.to_string(),
            self.counts.in_progress.to_string(),
            self.counts.done.to_string(),
            self.counts.blocked.to_string(),
        ]
    }
}

/// One report row per project: its task counts and completion progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReportRow {
    /// Project name.
    pub name: String,
    /// Percentage of the project's tasks that are done, rounded.
    /// Zero when the project has no tasks.
    pub progress_pct: u8,
    /// Task counts by status.
    #[serde(flatten)]
    pub counts: StatusCounts,
}

impl ProjectReportRow {
    /// Column headers, in the guaranteed export order.
    pub const CSV_HEADER: [&'static str; 8] = [
        "name",
        "progress_pct",
        "total",
        "backlog",
        "todo",
        "in_progress",
        "done",
        "blocked",
    ];

    /// The row's fields as strings, matching [`Self::CSV_HEADER`] order.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.progress_pct.to_string(),
            self.counts.total.to_string(),
            self.counts.backlog.to_string(),
            self.counts.todo.to_string(),
            self.counts.in_progress.to_string(),
            self.counts.done.to_string(),
            self.counts.blocked.to_string(),
        ]
    }
}

/// Aggregates assigned-task counts per user.
///
/// Every input user yields a row, zero-filled when nothing is assigned
/// to them; row order follows the input user order.
#[must_use]
pub fn aggregate_by_user(tasks: &[Task], users: &[User]) -> Vec<UserReportRow> {
    users
        .iter()
        .map(|user| UserReportRow {
            name: user.name.clone(),
            role: user.role.to_string(),
            counts: StatusCounts::tally(
                tasks
                    .iter()
                    .filter(|t| t.assignee.as_ref() == Some(&user.id)),
            ),
        })
        .collect()
}

/// Aggregates task counts and progress per project.
///
/// Every input project yields a row; progress is
/// `round(done / total * 100)`, defined as 0 for an empty project.
#[must_use]
pub fn aggregate_by_project(tasks: &[Task], projects: &[Project]) -> Vec<ProjectReportRow> {
    projects
        .iter()
        .map(|project| {
            let counts = StatusCounts::tally(
                tasks
                    .iter()
                    .filter(|t| t.project_id.as_ref() == Some(&project.id)),
            );
            ProjectReportRow {
                name: project.name.clone(),
                progress_pct: progress_pct(counts.done, counts.total),
                counts,
            }
        })
        .collect()
}

/// Rounded completion percentage, 0 when there are no tasks.
fn progress_pct(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Integer round-half-up; result is within 0..=100.
    #[allow(clippy::cast_possible_truncation)]
    {
        ((done * 100 + total / 2) / total) as u8
    }
}
