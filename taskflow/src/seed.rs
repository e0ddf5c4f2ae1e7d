//! Demo dataset: a small team, two projects and a spread of tasks.
//!
//! Used by the CLI and by integration tests that want a realistic
//! store without building fixtures by hand.

use chrono::NaiveDate;
use taskflow_model::{
    NewComment, NewProject, NewTask, NewUser, ProjectId, TaskId, TaskPriority, TaskStatus, UserId,
    UserRole,
};

use crate::store::{EntityStore, StoreError};

/// Ids of the seeded entities, for callers that want to point at them.
#[derive(Debug, Clone)]
pub struct SeedIds {
    /// The admin user.
    pub admin: UserId,
    /// The manager user.
    pub manager: UserId,
    /// The collaborator user.
    pub collaborator: UserId,
    /// The app-development project.
    pub app_project: ProjectId,
    /// The marketing project.
    pub marketing_project: ProjectId,
    /// All seeded task ids, in creation order.
    pub tasks: Vec<TaskId>,
}

/// Populates a store with the demo dataset.
///
/// # Errors
///
/// Returns a [`StoreError`] if any insert fails; the seed inputs are
/// valid, so this only happens when seeding a store that already holds
/// conflicting users.
pub async fn seed_demo(store: &EntityStore) -> Result<SeedIds, StoreError> {
    let admin = store
        .create_user(NewUser::new("john.doe@example.com", "John Doe", UserRole::Admin))
        .await?;
    let manager = store
        .create_user(NewUser::new(
            "jane.smith@example.com",
            "Jane Smith",
            UserRole::Manager,
        ))
        .await?;
    let collaborator = store
        .create_user(NewUser::new(
            "peter.jones@example.com",
            "Peter Jones",
            UserRole::Collaborator,
        ))
        .await?;

    let mut app_input = NewProject::new("TaskFlow App", admin.id.clone());
    app_input.description = Some("Frontend, backend and database work".to_string());
    app_input.members.extend([manager.id.clone(), collaborator.id.clone()]);
    let app_project = store.create_project(app_input).await?;

    let mut marketing_input = NewProject::new("Marketing Campaign", manager.id.clone());
    marketing_input.description = Some("Q4 launch campaign".to_string());
    let marketing_project = store.create_project(marketing_input).await?;

    let specs: [(&str, TaskStatus, TaskPriority, Option<&UserId>, Option<&ProjectId>); 6] = [
        (
            "Implement login page",
            TaskStatus::InProgress,
            TaskPriority::High,
            Some(&admin.id),
            Some(&app_project.id),
        ),
        (
            "Design database schema",
            TaskStatus::Todo,
            TaskPriority::High,
            Some(&manager.id),
            Some(&app_project.id),
        ),
        (
            "Set up CI pipeline",
            TaskStatus::Done,
            TaskPriority::Medium,
            Some(&collaborator.id),
            Some(&app_project.id),
        ),
        (
            "Write launch announcement",
            TaskStatus::Backlog,
            TaskPriority::Low,
            Some(&manager.id),
            Some(&marketing_project.id),
        ),
        (
            "Audit dependency licenses",
            TaskStatus::Blocked,
            TaskPriority::Urgent,
            None,
            Some(&app_project.id),
        ),
        ("Triage inbox", TaskStatus::Todo, TaskPriority::Low, None, None),
    ];

    let mut tasks = Vec::with_capacity(specs.len());
    for (i, (title, status, priority, assignee, project)) in specs.into_iter().enumerate() {
        let mut input = NewTask::new(title, admin.id.clone());
        input.status = status;
        input.priority = priority;
        input.assignee = assignee.cloned();
        input.project_id = project.cloned();
        #[allow(clippy::cast_possible_truncation)]
        {
            input.due_date = NaiveDate::from_ymd_opt(2026, 9, 1 + i as u32);
        }
        let task = store.create_task(input).await?;
        tasks.push(task.id);
    }

    store
        .add_comment(NewComment {
            task_id: tasks[0].clone(),
            user_id: manager.id.clone(),
            user_name: manager.name.clone(),
            content: "Starting to work on this.".to_string(),
        })
        .await?;
    store
        .add_comment(NewComment {
            task_id: tasks[0].clone(),
            user_id: admin.id.clone(),
            user_name: admin.name.clone(),
            content: "Need to clarify the validation rules.".to_string(),
        })
        .await?;

    Ok(SeedIds {
        admin: admin.id,
        manager: manager.id,
        collaborator: collaborator.id,
        app_project: app_project.id,
        marketing_project: marketing_project.id,
        tasks,
    })
}
