//! Check command toggling or appending checklist items.

use clap::Args;

use ticklist_app::{AppResult, TaskListViewModel};
use ticklist_store::TaskStore;

use crate::output::format_checklist;

/// Parse a checklist item position as shown by this command.
fn parse_item_position(s: &str) -> Result<usize, String> {
    let position: usize = s
        .parse()
        .map_err(|_| format!("invalid item position '{}'", s))?;
    if position == 0 {
        return Err("item positions are 1-based, starting at 1".to_string());
    }
    Ok(position)
}

/// Toggle or append checklist items on a task
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Task ID
    #[arg(required = true)]
    pub id: i64,

    /// Item position to toggle (1-based, as shown by this command)
    #[arg(value_parser = parse_item_position)]
    pub item: Option<usize>,

    /// Append a new unchecked item instead of toggling
    #[arg(long, conflicts_with = "item")]
    pub add: Option<String>,
}

impl CheckCommand {
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        vm.refresh().await?;

        match (&self.item, &self.add) {
            (Some(position), _) => {
                vm.toggle_checklist_item(self.id, position - 1).await?;
            }
            (None, Some(text)) => {
                vm.add_checklist_item(self.id, text).await?;
            }
            (None, None) => {}
        }

        let task = vm
            .tasks()
            .iter()
            .find(|t| t.id == self.id)
            .ok_or(ticklist_app::AppError::TaskNotFound { task_id: self.id })?;
        let items = task.checklist_items()?;
        Ok(format_checklist(&task.title, &items))
    }
}
