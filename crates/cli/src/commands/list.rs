//! List command showing the filtered, searched, and sorted task table.

use clap::Args;

use ticklist_app::{AppResult, SortKey, Tab, TaskListViewModel};
use ticklist_store::TaskStore;

use crate::commands::{parse_sort, parse_tab};
use crate::output::format_task_table;

/// Show the task list
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Completion tab: all, in-progress, or completed
    #[arg(long, value_parser = parse_tab, default_value = "all")]
    pub tab: Tab,

    /// Case-insensitive title search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort key: none, priority, or due-date
    #[arg(long, value_parser = parse_sort, default_value = "none")]
    pub sort: SortKey,
}

impl ListCommand {
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        vm.set_tab(self.tab);
        vm.set_search(self.search.clone());
        vm.set_sort(self.sort);
        vm.refresh().await?;

        Ok(format_task_table(vm.visible()))
    }
}
