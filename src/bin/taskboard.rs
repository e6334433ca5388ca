//! Command-line front end for the task API.
//!
//! Usage:
//!
//! ```text
//! taskboard [--api-url URL] [--token TOKEN] <command>
//! ```
//!
//! `login` prints a bearer token; export it as `TASKBOARD_TOKEN` (or pass
//! `--token`) so later commands run as that user. Other settings come from
//! the `TASKBOARD_*` environment variables read by [`ClientConfig`].

#![expect(
    clippy::print_stdout,
    reason = "the binary's output is the board rendered on stdout"
)]
#![expect(
    clippy::print_stderr,
    reason = "failures are reported to the terminal before exiting"
)]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use taskboard::board::{
    adapters::http::HttpTaskStore,
    domain::{NewProject, NewTask, Priority, ProjectId, TaskId, TaskStatus},
    services::{BoardError, BoardPolicy, DeleteOutcome, MoveOutcome, TaskBoardController},
};
use taskboard::config::{ClientConfig, ConfigError};
use taskboard::remote::{ApiClient, BearerToken, CredentialStore, RemoteError, SessionStatus};
use taskboard::session::{
    adapters::http::HttpAuthGateway,
    domain::{LoginCredentials, Registration},
    services::{SessionError, SessionService},
};
use taskboard::telemetry::init_tracing;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Kanban client for the task API")]
struct Cli {
    /// Base URL of the task API; overrides `TASKBOARD_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Bearer token; overrides `TASKBOARD_TOKEN`.
    #[arg(long, global = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and print the issued token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and print the issued token.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the user the token belongs to.
    Whoami,
    /// Show tasks grouped by status.
    Board,
    /// Move a task to another status.
    Move {
        id: u64,
        /// One of `todo`, `in_progress`, `completed`.
        status: TaskStatus,
    },
    /// Create a task.
    Create {
        title: String,
        #[arg(long)]
        project: Option<u64>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date as `YYYY-MM-DD`.
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Delete a task.
    Delete { id: u64 },
    /// List projects.
    Projects,
    /// Create a project.
    AddProject {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Deadline as `YYYY-MM-DD`.
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Delete a project and its tasks.
    RemoveProject { id: u64 },
    /// Show headline counts and recent items.
    Dashboard,
    /// List tasks due in a month.
    Calendar { year: i32, month: u32 },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("not logged in; run `taskboard login` and set TASKBOARD_TOKEN")]
    NotLoggedIn,
}

type Controller = TaskBoardController<HttpTaskStore, DefaultClock>;

struct App {
    config: ClientConfig,
    credentials: Arc<CredentialStore>,
    client: ApiClient,
}

impl App {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &cli.api_url {
            config = config.with_api_url(url)?;
        }
        if let Some(token) = &cli.token {
            config = config.with_token(token.as_str());
        }
        let credentials = Arc::new(match &config.token {
            Some(token) => CredentialStore::with_token(BearerToken::new(token.as_str())),
            None => CredentialStore::new(),
        });
        let client = ApiClient::new(&config, Arc::clone(&credentials))?;
        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    fn session(&self) -> SessionService<HttpAuthGateway> {
        SessionService::new(
            Arc::new(HttpAuthGateway::new(self.client.clone())),
            Arc::clone(&self.credentials),
        )
    }

    async fn board(&self) -> Result<Controller, CliError> {
        if self.credentials.status() != SessionStatus::Authenticated {
            return Err(CliError::NotLoggedIn);
        }
        let controller = TaskBoardController::new(
            Arc::new(HttpTaskStore::new(self.client.clone())),
            Arc::new(DefaultClock),
        )
        .with_policy(BoardPolicy::from(&self.config));
        controller.load().await?;
        Ok(controller)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let app = match App::new(&cli) {
        Ok(app) => app,
        Err(err) => return report(&err),
    };
    if let Err(err) = init_tracing(&app.config.log_filter) {
        eprintln!("logging disabled: {err}");
    }
    match run(&app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &CliError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}

async fn run(app: &App, command: Command) -> Result<(), CliError> {
    debug!(?command, api_url = %app.config.api_url, "running command");
    match command {
        Command::Login { email, password } => {
            let user = app
                .session()
                .login(&LoginCredentials::new(email, password))
                .await?;
            print_token(app, &user.username);
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let user = app
                .session()
                .register(&Registration::new(username, email, password))
                .await?;
            print_token(app, &user.username);
        }
        Command::Whoami => {
            let user = app.session().restore().await?.ok_or(CliError::NotLoggedIn)?;
            println!("{} <{}> ({})", user.username, user.email, user.role);
        }
        Command::Board => print_board(&app.board().await?),
        Command::Move { id, status } => {
            let controller = app.board().await?;
            match controller.move_task(TaskId::new(id), status).await? {
                MoveOutcome::Persisted => println!("task {id} moved to {}", status.label()),
                MoveOutcome::Skipped => println!("task {id} unchanged"),
            }
        }
        Command::Create {
            title,
            project,
            description,
            priority,
            due,
        } => {
            let mut new_task = NewTask::new(title)
                .with_description(description)
                .with_priority(priority);
            if let Some(project_id) = project {
                new_task = new_task.with_project(ProjectId::new(project_id));
            }
            if let Some(due_date) = due {
                new_task = new_task.with_due_date(due_date);
            }
            let task = app.board().await?.create_task(new_task).await?;
            println!("created task {}: {}", task.id(), task.title());
        }
        Command::Delete { id } => {
            let outcome = app.board().await?.delete_task(TaskId::new(id)).await?;
            print_delete("task", id, outcome);
        }
        Command::Projects => {
            for project in app.board().await?.projects() {
                println!(
                    "{:>4}  {} ({} tasks)",
                    project.id(),
                    project.name(),
                    project.task_count()
                );
            }
        }
        Command::AddProject {
            name,
            description,
            deadline,
        } => {
            let mut new_project = NewProject::new(name).with_description(description);
            if let Some(date) = deadline {
                new_project = new_project.with_deadline(date);
            }
            let project = app.board().await?.create_project(new_project).await?;
            println!("created project {}: {}", project.id(), project.name());
        }
        Command::RemoveProject { id } => {
            let outcome = app
                .board()
                .await?
                .delete_project(ProjectId::new(id))
                .await?;
            print_delete("project", id, outcome);
        }
        Command::Dashboard => {
            let summary = app.board().await?.dashboard();
            println!(
                "{} tasks in {} projects: {} to do, {} in progress, {} completed, {} overdue",
                summary.total_tasks,
                summary.total_projects,
                summary.todo,
                summary.in_progress,
                summary.completed,
                summary.overdue
            );
            for task in &summary.recent_tasks {
                println!("  {:>4}  {} [{}]", task.id(), task.title(), task.status().label());
            }
        }
        Command::Calendar { year, month } => {
            let view = app.board().await?.calendar(year, month);
            for entry in view.entries() {
                let project = entry.project_name.as_deref().unwrap_or("-");
                println!(
                    "{}  {:>4}  {} [{}] ({project})",
                    entry.date,
                    entry.task_id,
                    entry.title,
                    entry.priority
                );
            }
        }
    }
    Ok(())
}

fn print_token(app: &App, username: &str) {
    if let Some(token) = app.credentials.token() {
        println!("logged in as {username}");
        println!("export TASKBOARD_TOKEN={}", token.expose());
    }
}

fn print_board(controller: &Controller) {
    for (status, tasks) in controller.board().buckets() {
        println!("{} ({})", status.label(), tasks.len());
        for task in tasks {
            let due = task
                .due_date()
                .map_or_else(String::new, |date| format!(" due {date}"));
            println!("  {:>4}  {} [{}]{due}", task.id(), task.title(), task.priority());
        }
    }
}

fn print_delete(kind: &str, id: u64, outcome: DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted => println!("deleted {kind} {id}"),
        DeleteOutcome::Skipped => println!("no {kind} {id}"),
    }
}
