//! Task entity: the unit of work tracked on lists and kanban boards.
//!
//! Defines [`Task`] plus its status/priority enums and the [`NewTask`] /
//! [`TaskPatch`] input types consumed by the store's mutation layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patch::Patch;
use crate::project::ProjectId;
use crate::user::UserId;
use crate::ValidationError;

/// Maximum allowed task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a task: the kanban column it sits in.
///
/// The variant order is the canonical board column order and drives
/// status-column sorting. All transitions between any two states are
/// permitted; there is no enforced workflow ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Captured but not yet scheduled.
    Backlog,
    /// Scheduled, not started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Completed.
    Done,
    /// Cannot proceed until unblocked.
    Blocked,
}

impl TaskStatus {
    /// All statuses in canonical board column order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::Done,
        Self::Blocked,
    ];
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backlog => write!(f, "backlog"),
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Done => write!(f, "done"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Priority of a task. Ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority. The default for new tasks.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

/// A unit of work with status, priority, assignment and due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier. Immutable once created.
    pub id: TaskId,
    /// Short human-readable title. Never empty.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Current kanban column.
    pub status: TaskStatus,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// User the task is assigned to, if any.
    pub assignee: Option<UserId>,
    /// Project the task belongs to, if any.
    pub project_id: Option<ProjectId>,
    /// User who created the task.
    pub created_by: UserId,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. The store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Title. Must be non-empty and at most [`MAX_TITLE_LENGTH`] chars.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
    /// Priority; defaults to [`TaskPriority::Medium`].
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional assignee.
    pub assignee: Option<UserId>,
    /// Optional owning project.
    pub project_id: Option<ProjectId>,
    /// Creating user, stamped from the current session.
    pub created_by: UserId,
}

impl NewTask {
    /// Creates a minimal task input with the given title and creator.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            due_date: None,
            assignee: None,
            project_id: None,
            created_by,
        }
    }

    /// Validates field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TitleEmpty`] or
    /// [`ValidationError::TitleTooLong`] if the title is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update for a task. Absent fields are preserved.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// Replacement title, if changing.
    pub title: Option<String>,
    /// Description change.
    pub description: Patch<String>,
    /// Replacement status, if changing.
    pub status: Option<TaskStatus>,
    /// Replacement priority, if changing.
    pub priority: Option<TaskPriority>,
    /// Due date change.
    pub due_date: Patch<NaiveDate>,
    /// Assignee change.
    pub assignee: Patch<UserId>,
    /// Owning project change.
    pub project_id: Patch<ProjectId>,
}

impl TaskPatch {
    /// Validates the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TitleEmpty`] or
    /// [`ValidationError::TitleTooLong`] if a replacement title is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }

    /// Merges this patch onto a task. Timestamps are the store's concern.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        self.description.apply_to(&mut task.description);
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        self.due_date.apply_to(&mut task.due_date);
        self.assignee.apply_to(&mut task.assignee);
        self.project_id.apply_to(&mut task.project_id);
    }
}

/// Checks the non-empty and length invariants for a title.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleEmpty);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}
