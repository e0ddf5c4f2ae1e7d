//! Entity model definitions for `TaskFlow`.
//!
//! Defines the four domain entities (task, project, user, comment), their
//! identifier newtypes, the create/patch input types, and field-level
//! validation. This crate has no I/O and no async; the store and client
//! layers live in the `taskflow` crate.

pub mod comment;
pub mod patch;
pub mod project;
pub mod task;
pub mod user;

pub use comment::{Comment, CommentId, NewComment};
pub use patch::Patch;
pub use project::{NewProject, Project, ProjectId, ProjectPatch};
pub use task::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
pub use user::{NewUser, User, UserId, UserPatch, UserRole};

use thiserror::Error;

/// Errors produced by field-level validation of create/patch inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title cannot be empty.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Task title exceeds the maximum length.
    #[error("task title too long (max {} characters)", task::MAX_TITLE_LENGTH)]
    TitleTooLong,
    /// Project name cannot be empty.
    #[error("project name cannot be empty")]
    NameEmpty,
    /// Comment content cannot be empty.
    #[error("comment content cannot be empty")]
    ContentEmpty,
    /// Email address does not have a valid format.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
