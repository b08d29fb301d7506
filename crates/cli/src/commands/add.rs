//! Add command creating a new task.

use chrono::{DateTime, Utc};
use clap::Args;

use ticklist_app::{AppResult, TaskListViewModel};
use ticklist_store::{ChecklistItem, Priority, TaskDraft, TaskStore};

use crate::commands::{parse_date, parse_priority};

/// Create a new task
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Task title
    #[arg(required = true)]
    pub title: String,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Priority: low, medium, or high
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// Start date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<DateTime<Utc>>,

    /// Due date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: Option<DateTime<Utc>>,

    /// Checklist item text (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,
}

impl AddCommand {
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        let mut draft = TaskDraft::new(&self.title, &vm.session().user_id);

        if let Some(description) = &self.description {
            draft = draft.with_description(description);
        }
        if let Some(priority) = self.priority {
            draft = draft.with_priority(priority);
        }
        if let Some(start) = self.start {
            draft = draft.with_date_start(start);
        }
        if let Some(due) = self.due {
            draft = draft.with_due_date(due);
        }
        if !self.items.is_empty() {
            let items: Vec<ChecklistItem> = self
                .items
                .iter()
                .map(|text| ChecklistItem::new(text))
                .collect();
            draft = draft.with_checklist(&items);
        }

        vm.add(&draft).await?;
        Ok(format!("Added task: {}", self.title))
    }
}
