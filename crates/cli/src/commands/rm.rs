//! Remove command deleting a task.

use clap::Args;

use ticklist_app::{AppResult, TaskListViewModel};
use ticklist_store::TaskStore;

/// Delete a task
#[derive(Debug, Args)]
pub struct RmCommand {
    /// Task ID to delete
    #[arg(required = true)]
    pub id: i64,
}

impl RmCommand {
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        vm.delete(self.id).await?;
        Ok(format!("Deleted task: {}", self.id))
    }
}
