//! Done command marking a task complete.
//!
//! Completion is confirmed remotely before anything changes locally.
//! The success notice stays up for a short beat and then the list is
//! refreshed, matching how the task stays visible until the fresh list
//! arrives.

use clap::Args;

use ticklist_app::{AppResult, TaskListViewModel, COMPLETE_NOTICE};
use ticklist_store::TaskStore;

use crate::output::format_task_table;

/// Mark a task as complete
#[derive(Debug, Args)]
pub struct DoneCommand {
    /// Task ID to complete
    #[arg(required = true)]
    pub id: i64,
}

impl DoneCommand {
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        vm.complete(self.id).await?;

        println!("Completed task: {}", self.id);
        tokio::time::sleep(COMPLETE_NOTICE).await;

        vm.refresh().await?;
        Ok(format_task_table(vm.visible()))
    }
}
