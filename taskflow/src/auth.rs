//! Authorization predicate and session seam.
//!
//! Authentication itself is an external collaborator; the core only
//! consumes an already-established [`Session`] and answers the pure
//! role question, decoupled from any routing or rendering mechanism.

use taskflow_model::{UserId, UserRole};

/// The authenticated caller, as provided by the session layer.
///
/// The store stamps `created_by` from `user_id`; reports and guards
/// consult `role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The authenticated user's id.
    pub user_id: UserId,
    /// The authenticated user's role.
    pub role: UserRole,
}

impl Session {
    /// Creates a session for the given user and role.
    #[must_use]
    pub const fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Convenience wrapper around [`can_access`] for this session.
    #[must_use]
    pub fn can_access(&self, required: &[UserRole]) -> bool {
        can_access(self.role, required)
    }
}

/// Returns `true` if a caller with `role` may access a resource
/// restricted to `required` roles.
///
/// An empty `required` list means any authenticated caller is allowed.
#[must_use]
pub fn can_access(role: UserRole, required: &[UserRole]) -> bool {
    required.is_empty() || required.contains(&role)
}
