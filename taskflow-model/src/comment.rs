//! Comment entity: a note attached to a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::TaskId;
use crate::user::UserId;
use crate::ValidationError;

/// Unique identifier for a comment (UUID v7).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Creates a new time-ordered comment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `CommentId` from an existing UUID.
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

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note attached to a task.
///
/// `user_name` is a denormalized snapshot of the author's display name
/// taken at creation time; it is not updated when the user is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Authoring user.
    pub user_id: UserId,
    /// Author display name at the time of writing.
    pub user_name: String,
    /// Comment body. Never empty.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}

/// Input for adding a comment to a task.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Task to attach the comment to.
    pub task_id: TaskId,
    /// Authoring user.
    pub user_id: UserId,
    /// Author display name snapshot.
    pub user_name: String,
    /// Comment body. Must be non-empty.
    pub content: String,
}

impl NewComment {
    /// Validates field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ContentEmpty`] if the body is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.is_empty() {
            return Err(ValidationError::ContentEmpty);
        }
        Ok(())
    }
}
