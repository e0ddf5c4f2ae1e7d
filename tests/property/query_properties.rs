//! Property-based tests for the query pipeline.
//!
//! Uses proptest to verify:
//! 1. Every filtered item satisfies its predicates and came from the input.
//! 2. Sorting produces a correctly ordered permutation of the matches.
//! 3. Concatenating all pages reproduces the full result set exactly.
//! 4. Out-of-range pages are empty but still report correct totals.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::DateTime;
use proptest::prelude::*;
use taskflow::query::{
    run_query, Pagination, SortColumn, SortDirection, TaskFilter, TaskQuery, TaskSort,
};
use taskflow_model::{Task, TaskId, TaskPriority, TaskStatus, UserId};

// --- Strategies for task fixtures ---

/// Strategy for generating arbitrary `TaskStatus` values.
fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

/// Strategy for generating arbitrary `TaskPriority` values.
fn arb_priority() -> impl Strategy<Value = TaskPriority> {
    prop::sample::select(vec![
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ])
}

/// Strategy for generating tasks with distinct creation timestamps.
///
/// Titles come from a tiny alphabet so that equal sort keys are common
/// and stability is actually exercised.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(("[a-c]{1,4}", arb_status(), arb_priority()), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (title, status, priority))| {
                let created_at =
                    DateTime::from_timestamp(1_700_000_000 + i as i64, 0).unwrap();
                Task {
                    id: TaskId::new(),
                    title,
                    description: None,
                    status,
                    priority,
                    due_date: None,
                    assignee: None,
                    project_id: None,
                    created_by: UserId::new(),
                    created_at,
                    updated_at: created_at,
                }
            })
            .collect()
    })
}

/// Strategy for an optional status filter.
fn arb_status_filter() -> impl Strategy<Value = Option<TaskStatus>> {
    prop::option::of(arb_status())
}

// --- Property tests ---

proptest! {
    /// Every returned item came from the input and satisfies the filter;
    /// the reported total counts exactly the matching inputs.
    #[test]
    fn filter_is_sound_and_complete(tasks in arb_tasks(), status in arb_status_filter()) {
        let query = TaskQuery {
            filter: TaskFilter { status, ..TaskFilter::default() },
            pagination: Pagination { page: 1, page_size: usize::MAX },
            ..TaskQuery::default()
        };
        let page = run_query(&tasks, &[], &query);

        let expected = tasks
            .iter()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .count();
        prop_assert_eq!(page.total_items, expected);
        for item in &page.items {
            prop_assert!(tasks.iter().any(|t| t.id == item.id));
            if let Some(s) = status {
                prop_assert_eq!(item.status, s);
            }
        }
    }

    /// An ascending priority sort yields a non-decreasing permutation of
    /// the input, and ties keep their input order (stability).
    #[test]
    fn priority_sort_is_ordered_and_stable(tasks in arb_tasks()) {
        let query = TaskQuery {
            sort: TaskSort {
                column: SortColumn::Priority,
                direction: SortDirection::Ascending,
            },
            pagination: Pagination { page: 1, page_size: usize::MAX },
            ..TaskQuery::default()
        };
        let page = run_query(&tasks, &[], &query);
        prop_assert_eq!(page.items.len(), tasks.len());

        for pair in page.items.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                // Equal keys: input (creation) order must be preserved.
                prop_assert!(pair[0].created_at < pair[1].created_at);
            }
        }
    }

    /// Concatenating every page in order reproduces the full sorted
    /// result set, with no item lost or duplicated.
    #[test]
    fn pages_concatenate_to_the_full_result(tasks in arb_tasks(), page_size in 1usize..10) {
        let full = run_query(&tasks, &[], &TaskQuery {
            pagination: Pagination { page: 1, page_size: usize::MAX },
            ..TaskQuery::default()
        });

        let mut collected = Vec::new();
        let mut page_no = 1;
        loop {
            let page = run_query(&tasks, &[], &TaskQuery {
                pagination: Pagination { page: page_no, page_size },
                ..TaskQuery::default()
            });
            if page.items.is_empty() {
                break;
            }
            prop_assert!(page.items.len() <= page_size);
            collected.extend(page.items);
            page_no += 1;
        }

        prop_assert_eq!(collected, full.items);
    }

    /// A page index past the end yields no items but truthful totals.
    #[test]
    fn out_of_range_pages_are_empty(tasks in arb_tasks(), extra in 1usize..100) {
        let page_size = 10;
        let past_end = tasks.len().div_ceil(page_size) + extra;
        let page = run_query(&tasks, &[], &TaskQuery {
            pagination: Pagination { page: past_end, page_size },
            ..TaskQuery::default()
        });
        prop_assert!(page.items.is_empty());
        prop_assert_eq!(page.total_items, tasks.len());
        prop_assert_eq!(page.total_pages, tasks.len().div_ceil(page_size));
    }
}
