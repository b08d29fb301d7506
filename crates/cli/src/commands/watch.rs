//! Watch command following remote changes.
//!
//! Events carry no row data, so each one triggers a full refresh and
//! the table is reprinted.

use clap::Args;
use tracing::debug;

use ticklist_app::{AppResult, TaskListViewModel};
use ticklist_store::TaskStore;

use crate::output::format_task_table;

/// Follow remote changes and reprint the list on each one
#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Stop after this many changes (runs until interrupted by default)
    #[arg(long)]
    pub count: Option<usize>,
}

impl WatchCommand {
    pub async fn execute<S: TaskStore>(
        &self,
        vm: &mut TaskListViewModel<S>,
    ) -> AppResult<String> {
        vm.refresh().await?;
        println!("{}", format_task_table(vm.visible()));
        println!("Watching for changes (Ctrl-C to stop)...");

        let mut feed = vm.watch().await?;
        let mut seen = 0usize;

        while let Some(event) = feed.next().await {
            debug!(?event, "change received");
            vm.refresh().await?;
            println!("{}", format_task_table(vm.visible()));

            seen += 1;
            if let Some(count) = self.count {
                if seen >= count {
                    break;
                }
            }
        }

        Ok(format!("Feed closed after {} changes.", seen))
    }
}
