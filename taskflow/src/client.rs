//! Simulated-network API facade over the entity store.
//!
//! [`TaskFlowApi`] is the seam where a real REST backend (`/tasks`,
//! `/projects`, `/admin/users`) would plug in. It emulates the network
//! edge the UI has to survive: a configurable round-trip latency,
//! one-shot injectable transient failures, rejection of overlapping
//! in-flight mutations to the same task, and cancellation of fetches
//! whose caller has gone away.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use taskflow_model::{
    NewProject, NewTask, NewUser, Project, ProjectId, ProjectPatch, Task, TaskId, TaskPatch,
    TaskStatus, User, UserId, UserPatch,
};
use thiserror::Error;

use crate::store::{EntityKind, EntityStore, StoreError};

/// Errors surfaced by the simulated API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The store rejected the operation (validation, not-found, ...).
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A simulated network failure. The caller should roll back any
    /// optimistic state and notify the user; the core never retries.
    #[error("transient network failure")]
    Transient,
    /// A mutation for this task is still in flight; the caller must
    /// wait for it to settle before submitting another.
    #[error("mutation already in flight for task {0}")]
    MutationInFlight(TaskId),
    /// The caller cancelled the request before the response arrived;
    /// the result was discarded.
    #[error("request cancelled")]
    Cancelled,
}

/// Cancellation handle for fetches.
///
/// A view hands the token to a fetch and cancels it on navigation; a
/// late-arriving result is then discarded instead of being applied to
/// state that no longer exists.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a live (not cancelled) token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Releases the in-flight reservation for a task id on drop, so the
/// guard also clears on early returns and failures.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<TaskId>>,
    id: TaskId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.id);
    }
}

/// Client facade emulating a network-backed API over an [`EntityStore`].
#[derive(Debug)]
pub struct TaskFlowApi {
    store: Arc<EntityStore>,
    latency: Duration,
    fail_next: AtomicBool,
    in_flight: Mutex<HashSet<TaskId>>,
}

impl TaskFlowApi {
    /// Creates an API over the given store with the given simulated
    /// round-trip latency.
    #[must_use]
    pub fn new(store: Arc<EntityStore>, latency: Duration) -> Self {
        Self {
            store,
            latency,
            fail_next: AtomicBool::new(false),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Creates an API with zero latency, for tests.
    #[must_use]
    pub fn instant(store: Arc<EntityStore>) -> Self {
        Self::new(store, Duration::ZERO)
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    /// Arms a one-shot failure: the next mutation returns
    /// [`ApiError::Transient`] without touching the store.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Simulates the network round-trip shared by all calls.
    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Round-trip for mutations: sleeps, then fails if a failure is
    /// armed.
    async fn mutation_round_trip(&self) -> Result<(), ApiError> {
        self.round_trip().await;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            tracing::warn!("injected transient failure");
            return Err(ApiError::Transient);
        }
        Ok(())
    }

    /// Reserves the in-flight slot for a task, rejecting overlap.
    fn begin_mutation(&self, id: &TaskId) -> Result<InFlightGuard<'_>, ApiError> {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(id.clone()) {
            return Err(ApiError::MutationInFlight(id.clone()));
        }
        drop(in_flight);
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            id: id.clone(),
        })
    }

    /// Checks a token after the round-trip; a cancelled caller never
    /// sees the result.
    fn deliver<T>(token: &CancelToken, value: T) -> Result<T, ApiError> {
        if token.is_cancelled() {
            tracing::debug!("fetch result discarded after cancellation");
            return Err(ApiError::Cancelled);
        }
        Ok(value)
    }

    // --- fetches -----------------------------------------------------

    /// Fetches all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] if the token was cancelled while
    /// the request was in flight.
    pub async fn list_tasks(&self, token: &CancelToken) -> Result<Vec<Task>, ApiError> {
        self.round_trip().await;
        Self::deliver(token, self.store.list_tasks().await)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] on a cancelled token, or
    /// [`StoreError::NotFound`] via [`ApiError::Store`].
    pub async fn get_task(&self, id: &TaskId, token: &CancelToken) -> Result<Task, ApiError> {
        self.round_trip().await;
        let task = self.store.get_task(id).await.ok_or_else(|| {
            ApiError::Store(StoreError::NotFound {
                entity: EntityKind::Task,
                id: id.to_string(),
            })
        })?;
        Self::deliver(token, task)
    }

    /// Fetches all projects.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] on a cancelled token.
    pub async fn list_projects(&self, token: &CancelToken) -> Result<Vec<Project>, ApiError> {
        self.round_trip().await;
        Self::deliver(token, self.store.list_projects().await)
    }

    /// Fetches all users.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] on a cancelled token.
    pub async fn list_users(&self, token: &CancelToken) -> Result<Vec<User>, ApiError> {
        self.round_trip().await;
        Self::deliver(token, self.store.list_users().await)
    }

    // --- task mutations ----------------------------------------------

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] for an injected failure or a
    /// store error via [`ApiError::Store`].
    pub async fn create_task(&self, input: NewTask) -> Result<Task, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.create_task(input).await?)
    }

    /// Updates a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MutationInFlight`] if another mutation for
    /// the same task has not settled, [`ApiError::Transient`] for an
    /// injected failure, or a store error.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, ApiError> {
        let _guard = self.begin_mutation(id)?;
        self.mutation_round_trip().await?;
        Ok(self.store.update_task(id, patch).await?)
    }

    /// Changes a task's status (the kanban drag/drop mutation).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`update_task`](Self::update_task).
    pub async fn set_task_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let _guard = self.begin_mutation(id)?;
        self.mutation_round_trip().await?;
        Ok(self.store.set_task_status(id, status).await?)
    }

    /// Deletes a task. Returns whether a removal occurred.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MutationInFlight`] or [`ApiError::Transient`].
    pub async fn delete_task(&self, id: &TaskId) -> Result<bool, ApiError> {
        let _guard = self.begin_mutation(id)?;
        self.mutation_round_trip().await?;
        Ok(self.store.delete_task(id).await)
    }

    // --- project and user mutations ----------------------------------

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] or a store error.
    pub async fn create_project(&self, input: NewProject) -> Result<Project, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.create_project(input).await?)
    }

    /// Updates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] or a store error.
    pub async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.update_project(id, patch).await?)
    }

    /// Deletes a project, detaching its tasks. Returns whether a
    /// removal occurred.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] for an injected failure.
    pub async fn delete_project(&self, id: &ProjectId) -> Result<bool, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.delete_project(id).await)
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] or a store error.
    pub async fn create_user(&self, input: NewUser) -> Result<User, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.create_user(input).await?)
    }

    /// Updates a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] or a store error.
    pub async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.update_user(id, patch).await?)
    }

    /// Deletes a user, unassigning their tasks. Returns whether a
    /// removal occurred.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transient`] for an injected failure.
    pub async fn delete_user(&self, id: &UserId) -> Result<bool, ApiError> {
        self.mutation_round_trip().await?;
        Ok(self.store.delete_user(id).await)
    }
}
