//! Integration tests for the optimistic kanban move.
//!
//! Drives the board through the simulated API end to end: a successful
//! move settles in the store, a failed one rolls the local view back,
//! and overlapping moves on one card are rejected until the first
//! settles.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskflow::client::{ApiError, CancelToken, TaskFlowApi};
use taskflow::kanban::KanbanBoard;
use taskflow::seed::seed_demo;
use taskflow::store::EntityStore;
use taskflow_model::TaskStatus;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Seeds a store and builds a refreshed board over an instant API.
async fn seeded_board() -> (Arc<EntityStore>, TaskFlowApi, KanbanBoard, taskflow::seed::SeedIds) {
    let store = Arc::new(EntityStore::new());
    let ids = seed_demo(&store).await.unwrap();
    let api = TaskFlowApi::instant(Arc::clone(&store));
    let mut board = KanbanBoard::new();
    board.refresh(&api, &CancelToken::new()).await.unwrap();
    (store, api, board, ids)
}

// ===========================================================================
// Happy path
// ===========================================================================

#[tokio::test]
async fn successful_move_settles_in_store_and_board() {
    let (store, api, mut board, ids) = seeded_board().await;
    let id = &ids.tasks[0]; // seeded as in_progress

    board.move_card(&api, id, TaskStatus::Done).await.unwrap();

    assert!(board
        .column(TaskStatus::Done)
        .iter()
        .any(|t| &t.id == id));
    assert!(!board
        .column(TaskStatus::InProgress)
        .iter()
        .any(|t| &t.id == id));
    let stored = store.get_task(id).await.unwrap();
    assert_eq!(stored.status, TaskStatus::Done);
}

#[tokio::test]
async fn board_total_is_preserved_across_moves() {
    let (_store, api, mut board, ids) = seeded_board().await;
    let before = board.len();
    board
        .move_card(&api, &ids.tasks[1], TaskStatus::Blocked)
        .await
        .unwrap();
    assert_eq!(board.len(), before);
}

// ===========================================================================
// Failure and rollback
// ===========================================================================

#[tokio::test]
async fn transient_failure_rolls_back_board_and_store() {
    let (store, api, mut board, ids) = seeded_board().await;
    let id = &ids.tasks[0];
    let board_before = board.clone();
    let stored_before = store.get_task(id).await.unwrap();

    api.fail_next();
    let err = board
        .move_card(&api, id, TaskStatus::Done)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Transient);
    assert_eq!(board, board_before);
    assert_eq!(store.get_task(id).await.unwrap(), stored_before);
}

#[tokio::test]
async fn board_is_usable_again_after_a_rollback() {
    let (store, api, mut board, ids) = seeded_board().await;
    let id = &ids.tasks[0];

    api.fail_next();
    assert!(board.move_card(&api, id, TaskStatus::Done).await.is_err());

    // The failure was one-shot and the in-flight slot was released.
    board.move_card(&api, id, TaskStatus::Done).await.unwrap();
    assert_eq!(store.get_task(id).await.unwrap().status, TaskStatus::Done);
}

// ===========================================================================
// Overlapping mutations
// ===========================================================================

#[tokio::test]
async fn concurrent_moves_on_one_card_are_serialized() {
    let store = Arc::new(EntityStore::new());
    let ids = seed_demo(&store).await.unwrap();
    let api = Arc::new(TaskFlowApi::new(
        Arc::clone(&store),
        Duration::from_millis(50),
    ));
    let id = ids.tasks[0].clone();

    let slow = {
        let api = Arc::clone(&api);
        let id = id.clone();
        tokio::spawn(async move { api.set_task_status(&id, TaskStatus::Blocked).await })
    };
    // Give the first mutation time to take the in-flight slot.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = api.set_task_status(&id, TaskStatus::Done).await.unwrap_err();
    assert_eq!(err, ApiError::MutationInFlight(id.clone()));

    let settled = slow.await.unwrap().unwrap();
    assert_eq!(settled.status, TaskStatus::Blocked);
    // Once settled, the next move goes through.
    assert!(api.set_task_status(&id, TaskStatus::Done).await.is_ok());
}

#[tokio::test]
async fn cancelled_refresh_does_not_clobber_the_board() {
    let (_store, api, mut board, _ids) = seeded_board().await;
    let before = board.clone();
    let token = CancelToken::new();
    token.cancel();
    assert_eq!(
        board.refresh(&api, &token).await.unwrap_err(),
        ApiError::Cancelled
    );
    assert_eq!(board, before);
}
