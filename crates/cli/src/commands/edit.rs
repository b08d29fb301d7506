//! Edit command applying a partial update to a task.

use chrono::{DateTime, Utc};
use clap::Args;

use ticklist_app::{AppResult, TaskListViewModel};
use ticklist_store::{Priority, TaskPatch, TaskStore};

use crate::commands::{parse_date, parse_priority};

/// Edit a task's fields
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Task ID to edit
    #[arg(required = true)]
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New priority: low, medium, or high
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// New start date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<DateTime<Utc>>,

    /// New due date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: Option<DateTime<Utc>>,
}

impl EditCommand {
    fn build_patch(&self) -> TaskPatch {
        let mut patch = TaskPatch::new();
        if let Some(title) = &self.title {
            patch = patch.with_title(title);
        }
        if let Some(description) = &self.description {
            patch = patch.with_description(description);
        }
        if let Some(priority) = self.priority {
            patch = patch.with_priority(priority);
        }
        if let Some(start) = self.start {
            patch = patch.with_date_start(start);
        }
        if let Some(due) = self.due {
            patch = patch.with_due_date(due);
        }
        patch
    }

    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        let patch = self.build_patch();
        if !patch.has_updates() {
            return Ok("Nothing to update.".to_string());
        }

        vm.update(self.id, &patch).await?;
        Ok(format!("Updated task: {}", self.id))
    }
}
