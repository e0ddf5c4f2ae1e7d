//! Project operations on the entity store.

use chrono::Utc;
use taskflow_model::{NewProject, Project, ProjectId, ProjectPatch};

use super::{EntityKind, EntityStore, StoreError};

impl EntityStore {
    /// Returns all projects in insertion order.
    pub async fn list_projects(&self) -> Vec<Project> {
        self.inner.read().await.projects.clone()
    }

    /// Returns the project with the given id, if it exists.
    pub async fn get_project(&self, id: &ProjectId) -> Option<Project> {
        self.inner
            .read()
            .await
            .projects
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    /// Creates a project. The creator always becomes a member.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the name is empty.
    pub async fn create_project(&self, input: NewProject) -> Result<Project, StoreError> {
        input.validate()?;
        let now = Utc::now();
        let mut members = input.members;
        members.insert(input.created_by.clone());
        let project = Project {
            id: ProjectId::new(),
            name: input.name,
            description: input.description,
            created_by: input.created_by,
            members,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.projects.push(project.clone());
        tracing::debug!(project_id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    /// Shallow-merges a patch onto a project and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty replacement name,
    /// or [`StoreError::NotFound`] if the id does not exist.
    pub async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        patch.validate()?;
        let mut inner = self.inner.write().await;
        let project = inner
            .projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, id))?;
        patch.apply_to(project);
        project.updated_at = Utc::now();
        tracing::debug!(project_id = %id, "project updated");
        Ok(project.clone())
    }

    /// Removes a project and detaches it from every referencing task.
    ///
    /// The cascade keeps referential consistency: after deletion no task
    /// carries the removed project's id. Returns whether a removal
    /// occurred.
    pub async fn delete_project(&self, id: &ProjectId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.projects.len();
        inner.projects.retain(|p| &p.id != id);
        let removed = inner.projects.len() < before;
        if removed {
            let now = Utc::now();
            let mut detached = 0_usize;
            for task in inner
                .tasks
                .iter_mut()
                .filter(|t| t.project_id.as_ref() == Some(id))
            {
                task.project_id = None;
                task.updated_at = now;
                detached += 1;
            }
            tracing::debug!(project_id = %id, detached, "project deleted");
        }
        removed
    }
}
