//! User entity and role definitions.
//!
//! The core consumes users for assignment, `created_by` stamping and
//! report grouping. Authentication itself is an external collaborator;
//! only the email format and role set are modeled here.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationError;

/// Structural email check: one `@`, non-empty local part, dotted domain.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Unique identifier for a user (UUID v7).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new time-ordered user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `UserId` from an existing UUID.
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a user, used by the authorization predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including user administration.
    Admin,
    /// Manages projects and task assignment.
    Manager,
    /// Works on assigned tasks.
    Collaborator,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Collaborator => write!(f, "collaborator"),
        }
    }
}

/// An account known to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier. Immutable once created.
    pub id: UserId,
    /// Email address. Unique across the store, enforced at registration.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Authorization role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address. Must have a valid format.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Authorization role.
    pub role: UserRole,
}

impl NewUser {
    /// Creates a user input with the given email, name and role.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    /// Validates field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if the email is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)
    }
}

/// Partial update for a user. Absent fields are preserved.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replacement email, if changing.
    pub email: Option<String>,
    /// Replacement display name, if changing.
    pub name: Option<String>,
    /// Replacement role, if changing.
    pub role: Option<UserRole>,
}

impl UserPatch {
    /// Validates the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if a replacement email is
    /// malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Merges this patch onto a user.
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

/// Checks the structural email format.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}
