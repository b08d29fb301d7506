//! CLI commands for Ticklist
//!
//! Each command is a clap `Args` struct with an `execute` method that
//! drives the shared task list view model and returns the text to
//! print.

pub mod add;
pub mod check;
pub mod done;
pub mod edit;
pub mod list;
pub mod register;
pub mod rm;
pub mod watch;

pub use add::AddCommand;
pub use check::CheckCommand;
pub use done::DoneCommand;
pub use edit::EditCommand;
pub use list::ListCommand;
pub use register::RegisterCommand;
pub use rm::RmCommand;
pub use watch::WatchCommand;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use ticklist_app::{AppResult, SortKey, Tab, TaskListViewModel};
use ticklist_store::{Priority, TaskStore};

/// Available CLI commands
///
/// `register` runs before any session exists; everything else signs in
/// first and executes against the view model.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account
    Register(RegisterCommand),
    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that operate on a signed-in user's task list
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the task list
    List(ListCommand),
    /// Create a new task
    Add(AddCommand),
    /// Mark a task as complete
    Done(DoneCommand),
    /// Delete a task
    Rm(RmCommand),
    /// Edit a task's fields
    Edit(EditCommand),
    /// Toggle or append checklist items
    Check(CheckCommand),
    /// Follow remote changes and reprint the list
    Watch(WatchCommand),
}

impl SessionCommand {
    /// Execute the command against the view model, returning the text
    /// to display.
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        match self {
            SessionCommand::List(cmd) => cmd.execute(vm).await,
            SessionCommand::Add(cmd) => cmd.execute(vm).await,
            SessionCommand::Done(cmd) => cmd.execute(vm).await,
            SessionCommand::Rm(cmd) => cmd.execute(vm).await,
            SessionCommand::Edit(cmd) => cmd.execute(vm).await,
            SessionCommand::Check(cmd) => cmd.execute(vm).await,
            SessionCommand::Watch(cmd) => cmd.execute(vm).await,
        }
    }
}

/// Parse a tab name for the `--tab` flag.
pub fn parse_tab(s: &str) -> Result<Tab, String> {
    Tab::parse(s).ok_or_else(|| {
        format!(
            "invalid tab '{}', expected one of: all, in-progress, completed",
            s
        )
    })
}

/// Parse a sort key for the `--sort` flag.
pub fn parse_sort(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| {
        format!(
            "invalid sort key '{}', expected one of: none, priority, due-date",
            s
        )
    })
}

/// Parse a priority for the `--priority` flag.
pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("invalid priority '{}', expected one of: low, medium, high", s))
}

/// Parse a date flag as either RFC 3339 or a bare `YYYY-MM-DD` day
/// (interpreted as midnight UTC).
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(format!(
        "invalid date '{}', expected RFC 3339 or YYYY-MM-DD",
        s
    ))
}
