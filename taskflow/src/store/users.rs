//! User operations on the entity store.
//!
//! Email uniqueness is enforced at registration and on email change;
//! comparisons are case-insensitive.

use chrono::Utc;
use taskflow_model::{NewUser, User, UserId, UserPatch};

use super::{EntityKind, EntityStore, StoreError};

impl EntityStore {
    /// Returns all users in insertion order.
    pub async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    /// Returns the user with the given id, if it exists.
    pub async fn get_user(&self, id: &UserId) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a malformed email, or
    /// [`StoreError::EmailTaken`] if another user already has it.
    pub async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        if inner
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(StoreError::EmailTaken(input.email));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: input.email,
            name: input.name,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        tracing::debug!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Shallow-merges a patch onto a user and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a malformed replacement
    /// email, [`StoreError::EmailTaken`] if it belongs to another user,
    /// or [`StoreError::NotFound`] if the id does not exist.
    pub async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, StoreError> {
        patch.validate()?;
        let mut inner = self.inner.write().await;
        if let Some(email) = &patch.email {
            if inner
                .users
                .iter()
                .any(|u| &u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(StoreError::EmailTaken(email.clone()));
            }
        }
        let user = inner
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::User, id))?;
        patch.apply_to(user);
        user.updated_at = Utc::now();
        tracing::debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    /// Removes a user, unassigning their tasks and dropping them from
    /// project member sets. Returns whether a removal occurred.
    pub async fn delete_user(&self, id: &UserId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| &u.id != id);
        let removed = inner.users.len() < before;
        if removed {
            let now = Utc::now();
            for task in inner
                .tasks
                .iter_mut()
                .filter(|t| t.assignee.as_ref() == Some(id))
            {
                task.assignee = None;
                task.updated_at = now;
            }
            for project in inner.projects.iter_mut() {
                project.members.remove(id);
            }
            tracing::debug!(user_id = %id, "user deleted");
        }
        removed
    }
}
