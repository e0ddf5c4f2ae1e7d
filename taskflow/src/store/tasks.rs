//! Task operations on the entity store.

use chrono::Utc;
use taskflow_model::{NewTask, Task, TaskId, TaskPatch, TaskStatus};

use super::{EntityKind, EntityStore, StoreError};

impl EntityStore {
    /// Returns all tasks in insertion order.
    pub async fn list_tasks(&self) -> Vec<Task> {
        self.inner.read().await.tasks.clone()
    }

    /// Returns the task with the given id, if it exists.
    pub async fn get_task(&self, id: &TaskId) -> Option<Task> {
        self.inner
            .read()
            .await
            .tasks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
    }

    /// Creates a task from validated input.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the title is empty or too
    /// long.
    pub async fn create_task(&self, input: NewTask) -> Result<Task, StoreError> {
        input.validate()?;
        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            assignee: input.assignee,
            project_id: input.project_id,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.tasks.push(task.clone());
        tracing::debug!(task_id = %task.id, title = %task.title, "task created");
        Ok(task)
    }

    /// Shallow-merges a patch onto a task and refreshes `updated_at`.
    ///
    /// An empty patch leaves every field except `updated_at` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an invalid replacement
    /// title, or [`StoreError::NotFound`] if the id does not exist.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        patch.validate()?;
        let mut inner = self.inner.write().await;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;
        patch.apply_to(task);
        task.updated_at = Utc::now();
        tracing::debug!(task_id = %id, "task updated");
        Ok(task.clone())
    }

    /// Changes a task's status, refreshing `updated_at`.
    ///
    /// A no-op (same status) returns the task without touching
    /// `updated_at`. Any status may transition to any other.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id does not exist.
    pub async fn set_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;
        if task.status == status {
            return Ok(task.clone());
        }
        let old = task.status;
        task.status = status;
        task.updated_at = Utc::now();
        tracing::debug!(task_id = %id, from = %old, to = %status, "task status changed");
        Ok(task.clone())
    }

    /// Removes a task and its comments. Returns whether a removal
    /// occurred.
    pub async fn delete_task(&self, id: &TaskId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| &t.id != id);
        let removed = inner.tasks.len() < before;
        if removed {
            inner.comments.retain(|c| &c.task_id != id);
            tracing::debug!(task_id = %id, "task deleted");
        }
        removed
    }
}
