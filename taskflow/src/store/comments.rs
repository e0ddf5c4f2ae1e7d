//! Comment operations on the entity store.

use chrono::Utc;
use taskflow_model::{Comment, CommentId, NewComment, TaskId};

use super::{EntityKind, EntityStore, StoreError};

impl EntityStore {
    /// Returns the comments attached to a task, oldest first.
    pub async fn comments_for_task(&self, task_id: &TaskId) -> Vec<Comment> {
        self.inner
            .read()
            .await
            .comments
            .iter()
            .filter(|c| &c.task_id == task_id)
            .cloned()
            .collect()
    }

    /// Attaches a comment to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty body, or
    /// [`StoreError::NotFound`] if the parent task does not exist.
    pub async fn add_comment(&self, input: NewComment) -> Result<Comment, StoreError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        if !inner.tasks.iter().any(|t| t.id == input.task_id) {
            return Err(StoreError::not_found(EntityKind::Task, &input.task_id));
        }
        let comment = Comment {
            id: CommentId::new(),
            task_id: input.task_id,
            user_id: input.user_id,
            user_name: input.user_name,
            content: input.content,
            created_at: Utc::now(),
        };
        inner.comments.push(comment.clone());
        tracing::debug!(comment_id = %comment.id, task_id = %comment.task_id, "comment added");
        Ok(comment)
    }

    /// Removes a comment. Returns whether a removal occurred.
    pub async fn delete_comment(&self, id: &CommentId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.comments.len();
        inner.comments.retain(|c| &c.id != id);
        inner.comments.len() < before
    }
}
