//! `TaskFlow` demo driver -- exercises the core end to end.
//!
//! Seeds the in-memory store with the demo dataset, runs a list-view
//! query, performs an optimistic kanban move and prints the per-user
//! and per-project reports.
//!
//! # Usage
//!
//! ```bash
//! # Run with the default 500ms simulated latency
//! cargo run --bin taskflow-cli
//!
//! # Instant responses, JSON output
//! cargo run --bin taskflow-cli -- --latency-ms 0 --json
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use taskflow::client::{ApiError, CancelToken, TaskFlowApi};
use taskflow::kanban::KanbanBoard;
use taskflow::query::{run_query, Pagination, TaskQuery};
use taskflow::report::{aggregate_by_project, aggregate_by_user};
use taskflow::seed::seed_demo;
use taskflow::store::EntityStore;
use taskflow_cli::config::{CliArgs, Config};
use taskflow_model::TaskStatus;

/// Errors the demo run can surface.
#[derive(Debug, thiserror::Error)]
enum DemoError {
    /// The simulated API rejected an operation.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Seeding the store failed.
    #[error(transparent)]
    Store(#[from] taskflow::store::StoreError),
    /// JSON output could not be produced.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(latency_ms = config.latency_ms, "starting taskflow demo");

    if let Err(e) = run_demo(&config).await {
        tracing::error!(error = %e, "demo run failed");
        std::process::exit(1);
    }
}

/// Seeds the store and walks through the core operations.
async fn run_demo(config: &Config) -> Result<(), DemoError> {
    let store = Arc::new(EntityStore::new());
    let ids = seed_demo(&store).await?;
    let api = TaskFlowApi::new(
        Arc::clone(&store),
        Duration::from_millis(config.latency_ms),
    );
    let token = CancelToken::new();

    // List view: first page, newest first.
    let tasks = api.list_tasks(&token).await?;
    let users = api.list_users(&token).await?;
    let query = TaskQuery {
        pagination: Pagination {
            page: 1,
            page_size: config.page_size,
        },
        ..TaskQuery::default()
    };
    let page = run_query(&tasks, &users, &query);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        println!(
            "Tasks (page {} of {}, {} total):",
            page.page, page.total_pages, page.total_items
        );
        for task in &page.items {
            println!("  [{}] {} ({})", task.status, task.title, task.priority);
        }
    }

    // Kanban: move the first seeded task to done, optimistically.
    let mut board = KanbanBoard::new();
    board.refresh(&api, &token).await?;
    board.move_card(&api, &ids.tasks[0], TaskStatus::Done).await?;
    if !config.json {
        println!("\nBoard after moving the first task to done:");
        for (status, cards) in board.columns() {
            println!("  {status}: {}", cards.len());
        }
    }

    // Reports.
    let tasks = api.list_tasks(&token).await?;
    let projects = api.list_projects(&token).await?;
    let user_rows = aggregate_by_user(&tasks, &users);
    let project_rows = aggregate_by_project(&tasks, &projects);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&user_rows)?);
        println!("{}", serde_json::to_string_pretty(&project_rows)?);
    } else {
        println!("\nTasks by user:");
        for row in &user_rows {
            println!(
                "  {} ({}): {} total, {} done",
                row.name, row.role, row.counts.total, row.counts.done
            );
        }
        println!("\nTasks by project:");
        for row in &project_rows {
            println!(
                "  {}: {} total, {}% complete",
                row.name, row.counts.total, row.progress_pct
            );
        }
    }

    Ok(())
}
