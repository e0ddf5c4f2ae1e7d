//! In-memory entity store for tasks, projects, users and comments.
//!
//! [`EntityStore`] is the single owner of all entity collections: one
//! injectable object instead of global mutable state, so every test can
//! work against its own isolated instance. Collections are Vec-backed
//! and preserve insertion order, which the query layer relies on for
//! stable-sort semantics. Nothing is persisted beyond the process
//! lifetime.
//!
//! Thread-safe via a single [`RwLock`]; mutations take the write lock
//! for the duration of one operation, so cascades (project delete
//! detaching its tasks, for example) are applied atomically.

mod comments;
mod projects;
mod tasks;
mod users;

use taskflow_model::ValidationError;
use thiserror::Error;
use tokio::sync::RwLock;

use taskflow_model::{Comment, Project, Task, User};

/// Which entity collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A task record.
    Task,
    /// A project record.
    Project,
    /// A user record.
    User,
    /// A comment record.
    Comment,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Project => write!(f, "project"),
            Self::User => write!(f, "user"),
            Self::Comment => write!(f, "comment"),
        }
    }
}

/// Errors returned by store mutations.
///
/// A missing id is a routine, expected condition and is reported as
/// [`StoreError::NotFound`], never a panic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The input failed field-level validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No record with the given id exists.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Which collection was searched.
        entity: EntityKind,
        /// The id that was looked up.
        id: String,
    },
    /// A user with this email is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(String),
}

impl StoreError {
    /// Shorthand for a [`StoreError::NotFound`] value.
    pub(crate) fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// The entity collections. Vec-backed; insertion order is meaningful.
#[derive(Debug, Default)]
struct Collections {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    users: Vec<User>,
    comments: Vec<Comment>,
}

/// In-memory store owning all entity collections.
///
/// All operations are async and take `&self`; interior mutability via
/// [`RwLock`]. Create operations validate input, assign a fresh UUID v7
/// id and stamp `created_at`/`updated_at`. Updates shallow-merge a patch
/// and refresh `updated_at`. Deletes report whether a removal occurred
/// and keep foreign references consistent by detaching them.
#[derive(Debug, Default)]
pub struct EntityStore {
    inner: RwLock<Collections>,
}

impl EntityStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
