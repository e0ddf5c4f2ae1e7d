//! Integration tests for report aggregation over a seeded store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskflow::report::{aggregate_by_project, aggregate_by_user, UserReportRow};
use taskflow::seed::seed_demo;
use taskflow::store::EntityStore;
use taskflow_model::TaskStatus;

#[tokio::test]
async fn user_report_covers_every_user_and_sums_to_assigned_tasks() {
    let store = EntityStore::new();
    seed_demo(&store).await.unwrap();
    let tasks = store.list_tasks().await;
    let users = store.list_users().await;

    let rows = aggregate_by_user(&tasks, &users);
    assert_eq!(rows.len(), users.len());

    let assigned = tasks.iter().filter(|t| t.assignee.is_some()).count();
    let total: usize = rows.iter().map(|r| r.counts.total).sum();
    assert_eq!(total, assigned);
}

#[tokio::test]
async fn user_report_reflects_status_changes() {
    let store = EntityStore::new();
    let ids = seed_demo(&store).await.unwrap();

    // ids.tasks[1] is assigned to the manager.
    store
        .set_task_status(&ids.tasks[1], TaskStatus::Done)
        .await
        .unwrap();

    let rows = aggregate_by_user(&store.list_tasks().await, &store.list_users().await);
    let manager_row = rows.iter().find(|r| r.name == "Jane Smith").unwrap();
    assert_eq!(manager_row.counts.done, 1);
}

#[tokio::test]
async fn project_report_has_zero_filled_rows_and_progress() {
    let store = EntityStore::new();
    seed_demo(&store).await.unwrap();
    let rows = aggregate_by_project(&store.list_tasks().await, &store.list_projects().await);
    assert_eq!(rows.len(), 2);

    // The app project holds 1 done task out of 4: round(25) = 25.
    let app = rows.iter().find(|r| r.name == "TaskFlow App").unwrap();
    assert_eq!(app.counts.total, 4);
    assert_eq!(app.progress_pct, 25);

    // The marketing project has one backlog task and no progress.
    let marketing = rows.iter().find(|r| r.name == "Marketing Campaign").unwrap();
    assert_eq!(marketing.counts.total, 1);
    assert_eq!(marketing.counts.backlog, 1);
    assert_eq!(marketing.progress_pct, 0);
}

#[tokio::test]
async fn report_rows_follow_store_order() {
    let store = EntityStore::new();
    seed_demo(&store).await.unwrap();
    let users = store.list_users().await;
    let rows = aggregate_by_user(&store.list_tasks().await, &users);
    let row_names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let user_names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(row_names, user_names);
}

#[tokio::test]
async fn csv_records_line_up_with_the_header() {
    let store = EntityStore::new();
    seed_demo(&store).await.unwrap();
    let rows = aggregate_by_user(&store.list_tasks().await, &store.list_users().await);
    for row in &rows {
        assert_eq!(row.to_record().len(), UserReportRow::CSV_HEADER.len());
    }
}
