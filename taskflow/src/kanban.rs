//! Kanban board controller: optimistic status moves with rollback.
//!
//! [`KanbanBoard`] holds the board's local view of the tasks, grouped
//! into columns by status. Moving a card is an explicit two-phase
//! operation: the move is applied to the local view immediately so the
//! UI reflects it before the simulated network round-trip completes,
//! then either confirmed with the store's record or rolled back to the
//! pre-move snapshot when the mutation fails.

use std::collections::BTreeMap;

use taskflow_model::{Task, TaskId, TaskStatus};

use crate::client::{ApiError, CancelToken, TaskFlowApi};
use crate::store::{EntityKind, StoreError};

/// Local board state: one column per status, cards ordered by creation
/// time within each column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanbanBoard {
    columns: BTreeMap<TaskStatus, Vec<Task>>,
}

impl KanbanBoard {
    /// Creates an empty board with all columns present.
    #[must_use]
    pub fn new() -> Self {
        let mut columns = BTreeMap::new();
        for status in TaskStatus::ALL {
            columns.insert(status, Vec::new());
        }
        Self { columns }
    }

    /// Builds a board from a task snapshot.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut board = Self::new();
        for task in tasks {
            board.insert_card(task);
        }
        board
    }

    /// Reloads the board from the store through the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] if the token was cancelled while
    /// the fetch was in flight; the board is left unchanged in that
    /// case.
    pub async fn refresh(
        &mut self,
        api: &TaskFlowApi,
        token: &CancelToken,
    ) -> Result<(), ApiError> {
        let tasks = api.list_tasks(token).await?;
        *self = Self::from_tasks(tasks);
        Ok(())
    }

    /// Returns the cards in one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map_or(&[], Vec::as_slice)
    }

    /// Iterates the columns in canonical order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| (status, self.column(status)))
    }

    /// Total number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Returns `true` if the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves a card to another column, optimistically.
    ///
    /// Phase one applies the move to the local view at once; phase two
    /// awaits the mutation. On success the confirmed record replaces
    /// the optimistic card; on failure the board rolls back to the
    /// pre-move snapshot and the error is surfaced. Moving a card onto
    /// its own column is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MutationInFlight`], [`ApiError::Transient`]
    /// or a store error, after rolling back the local view.
    pub async fn move_card(
        &mut self,
        api: &TaskFlowApi,
        id: &TaskId,
        new_status: TaskStatus,
    ) -> Result<(), ApiError> {
        let Some(current) = self.status_of(id) else {
            return Err(ApiError::Store(StoreError::NotFound {
                entity: EntityKind::Task,
                id: id.to_string(),
            }));
        };
        if current == new_status {
            return Ok(());
        }

        let snapshot = self.columns.clone();

        // Phase one: tentative local move.
        if let Some(mut card) = self.remove_card(id) {
            card.status = new_status;
            self.insert_card(card);
        }

        // Phase two: confirm or revert.
        match api.set_task_status(id, new_status).await {
            Ok(confirmed) => {
                self.remove_card(id);
                self.insert_card(confirmed);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "status move failed, rolling back");
                self.columns = snapshot;
                Err(err)
            }
        }
    }

    /// Returns the column a card currently sits in.
    fn status_of(&self, id: &TaskId) -> Option<TaskStatus> {
        self.columns.iter().find_map(|(status, cards)| {
            cards.iter().any(|t| &t.id == id).then_some(*status)
        })
    }

    /// Removes a card from whichever column holds it.
    fn remove_card(&mut self, id: &TaskId) -> Option<Task> {
        for cards in self.columns.values_mut() {
            if let Some(pos) = cards.iter().position(|t| &t.id == id) {
                return Some(cards.remove(pos));
            }
        }
        None
    }

    /// Inserts a card into its status column, keeping creation order.
    fn insert_card(&mut self, task: Task) {
        let cards = self.columns.entry(task.status).or_default();
        let pos = cards
            .iter()
            .position(|t| t.created_at > task.created_at)
            .unwrap_or(cards.len());
        cards.insert(pos, task);
    }
}
