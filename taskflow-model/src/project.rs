//! Project entity: a named grouping of tasks with membership.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patch::Patch;
use crate::user::UserId;
use crate::ValidationError;

/// Unique identifier for a project (UUID v7).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a new time-ordered project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `ProjectId` from an existing UUID.
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

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named grouping of tasks with a member set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier. Immutable once created.
    pub id: ProjectId,
    /// Project name. Never empty.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// User who created the project.
    pub created_by: UserId,
    /// Users who are members of the project.
    pub members: BTreeSet<UserId>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Name. Must be non-empty.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creating user; also becomes the first member.
    pub created_by: UserId,
    /// Additional members to include from the start.
    pub members: BTreeSet<UserId>,
}

impl NewProject {
    /// Creates a minimal project input with the given name and creator.
    #[must_use]
    pub fn new(name: impl Into<String>, created_by: UserId) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_by,
            members: BTreeSet::new(),
        }
    }

    /// Validates field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameEmpty`] if the name is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameEmpty);
        }
        Ok(())
    }
}

/// Partial update for a project. Absent fields are preserved.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    /// Replacement name, if changing.
    pub name: Option<String>,
    /// Description change.
    pub description: Patch<String>,
    /// Replacement member set, if changing.
    pub members: Option<BTreeSet<UserId>>,
}

impl ProjectPatch {
    /// Validates the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameEmpty`] if a replacement name is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_deref() == Some("") {
            return Err(ValidationError::NameEmpty);
        }
        Ok(())
    }

    /// Merges this patch onto a project.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        self.description.apply_to(&mut project.description);
        if let Some(members) = self.members {
            project.members = members;
        }
    }
}
