//! Pure query layer for task list views: filter, sort, paginate.
//!
//! All functions operate on plain slices and return owned pages; the
//! store is not involved, so the layer is trivially testable and the
//! same logic serves any view. Filters compose with logical AND, the
//! sort is stable (equal keys keep their input order), and page
//! requests past the end yield an empty page rather than an error.

use std::cmp::Ordering;
use std::collections::HashMap;

use taskflow_model::{Task, TaskPriority, TaskStatus, User, UserId};

/// Default number of tasks per page, matching the original list view.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which task field to sort on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    /// Title, case-insensitive.
    Title,
    /// Status in canonical board column order.
    Status,
    /// Priority by urgency rank.
    Priority,
    /// Due date, chronological. Tasks without one compare equal.
    DueDate,
    /// Resolved assignee display name, case-insensitive.
    Assignee,
    /// Creation time.
    #[default]
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first. The default for the creation-time column.
    #[default]
    Descending,
}

impl SortDirection {
    /// Flips the direction, as a column-header click does.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Optional predicates over tasks. `None` means "all"; set predicates
/// compose with logical AND.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring match against title, description and
    /// resolved assignee name.
    pub search: Option<String>,
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Exact priority match.
    pub priority: Option<TaskPriority>,
    /// Exact assignee match.
    pub assignee: Option<UserId>,
}

/// Sort specification: column plus direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSort {
    /// Field to sort on.
    pub column: SortColumn,
    /// Direction.
    pub direction: SortDirection,
}

/// Page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index.
    pub page: usize,
    /// Tasks per page.
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A complete list-view query.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    /// Filter predicates.
    pub filter: TaskFilter,
    /// Sort specification.
    pub sort: TaskSort,
    /// Page request.
    pub pagination: Pagination,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// The tasks on this page, filtered and sorted.
    pub items: Vec<Task>,
    /// Total matching tasks across all pages.
    pub total_items: usize,
    /// Total page count; 0 when nothing matches.
    pub total_pages: usize,
    /// The requested 1-based page index.
    pub page: usize,
}

/// Runs a full list-view query: filter, stable sort, then paginate.
///
/// `users` is consulted to resolve assignee display names for search
/// and for the assignee sort column.
#[must_use]
pub fn run_query(tasks: &[Task], users: &[User], query: &TaskQuery) -> TaskPage {
    let names = name_index(users);
    let mut matching: Vec<Task> = tasks
        .iter()
        .filter(|t| matches_filter(t, &query.filter, &names))
        .cloned()
        .collect();
    sort_tasks(&mut matching, query.sort, &names);
    paginate(matching, query.pagination)
}

/// Builds a user-id to display-name lookup.
fn name_index(users: &[User]) -> HashMap<&UserId, &str> {
    users.iter().map(|u| (&u.id, u.name.as_str())).collect()
}

/// Returns `true` if the task satisfies every active predicate.
fn matches_filter(task: &Task, filter: &TaskFilter, names: &HashMap<&UserId, &str>) -> bool {
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        if !needle.is_empty() && !matches_search(task, &needle, names) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if task.status != status {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if task.priority != priority {
            return false;
        }
    }
    if let Some(assignee) = &filter.assignee {
        if task.assignee.as_ref() != Some(assignee) {
            return false;
        }
    }
    true
}

/// Substring search over title, description and assignee name.
/// `needle` must already be lowercased.
fn matches_search(task: &Task, needle: &str, names: &HashMap<&UserId, &str>) -> bool {
    if task.title.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(description) = &task.description {
        if description.to_lowercase().contains(needle) {
            return true;
        }
    }
    if let Some(assignee) = &task.assignee {
        if let Some(name) = names.get(assignee) {
            if name.to_lowercase().contains(needle) {
                return true;
            }
        }
    }
    false
}

/// Stable-sorts tasks on the selected column.
///
/// When either compared task lacks a value for the column (no due date,
/// no resolvable assignee), the pair compares equal and keeps its input
/// order.
fn sort_tasks(tasks: &mut [Task], sort: TaskSort, names: &HashMap<&UserId, &str>) {
    tasks.sort_by(|a, b| {
        let ord = compare_on(a, b, sort.column, names);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Compares two tasks on one column.
fn compare_on(a: &Task, b: &Task, column: SortColumn, names: &HashMap<&UserId, &str>) -> Ordering {
    match column {
        SortColumn::Title => fold_cmp(&a.title, &b.title),
        SortColumn::Status => a.status.cmp(&b.status),
        SortColumn::Priority => a.priority.cmp(&b.priority),
        SortColumn::DueDate => cmp_optional(a.due_date.as_ref(), b.due_date.as_ref(), Ord::cmp),
        SortColumn::Assignee => cmp_optional(
            resolve_name(a, names).as_deref(),
            resolve_name(b, names).as_deref(),
            |x, y| x.cmp(y),
        ),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Case-insensitive string comparison via Unicode lowercase fold.
fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Compares optional keys; an absent key on either side means equal.
fn cmp_optional<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        _ => Ordering::Equal,
    }
}

/// Resolves the lowercased assignee display name, if any.
fn resolve_name(task: &Task, names: &HashMap<&UserId, &str>) -> Option<String> {
    task.assignee
        .as_ref()
        .and_then(|id| names.get(id))
        .map(|name| name.to_lowercase())
}

/// Slices one 1-based page out of the full result set.
///
/// Out-of-range pages yield an empty `items`, never an error.
fn paginate(items: Vec<Task>, pagination: Pagination) -> TaskPage {
    let page_size = pagination.page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = pagination.page.saturating_sub(1).saturating_mul(page_size);
    let page_items = if pagination.page == 0 || start >= total_items {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect()
    };
    TaskPage {
        items: page_items,
        total_items,
        total_pages,
        page: pagination.page,
    }
}
