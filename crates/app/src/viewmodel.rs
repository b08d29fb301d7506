//! The task list view model.
//!
//! Owns the loaded task list and the current view settings, and talks
//! to a [`TaskStore`] for every remote operation. All list mutations
//! go through [`TaskListViewModel::rebuild`] so the visible list is
//! always consistent with the loaded tasks and settings.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use ticklist_store::{
    ChangeFeed, ChecklistItem, Session, Task, TaskDraft, TaskPatch, TaskStore, TASKS_TABLE,
};

use crate::error::{AppError, AppResult};
use crate::view::{derive_view, SortKey, Tab};

/// How long a completion success notice stays visible before the list
/// refreshes
pub const COMPLETE_NOTICE: Duration = Duration::from_millis(1500);

/// View model driving a user's task list
pub struct TaskListViewModel<S: TaskStore> {
    store: Arc<S>,
    session: Session,
    all_tasks: Vec<Task>,
    tab: Tab,
    search: String,
    sort: SortKey,
    visible: Vec<Task>,
}

impl<S: TaskStore> TaskListViewModel<S> {
    /// Create a view model with an empty list and default view settings
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            store,
            session,
            all_tasks: Vec::new(),
            tab: Tab::default(),
            search: String::new(),
            sort: SortKey::default(),
            visible: Vec::new(),
        }
    }

    /// The session this view model acts for
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every loaded task, in fetch order
    pub fn tasks(&self) -> &[Task] {
        &self.all_tasks
    }

    /// The currently visible tasks after filter, search, and sort
    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    fn rebuild(&mut self) {
        self.visible = derive_view(&self.all_tasks, self.tab, &self.search, self.sort);
    }

    /// Refetch the task list from the store.
    ///
    /// On failure the loaded list is left untouched; the caller keeps
    /// showing the previous state.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let tasks = self.store.list_tasks(&self.session.user_id).await?;
        debug!(count = tasks.len(), "refreshed task list");
        self.all_tasks = tasks;
        self.rebuild();
        Ok(())
    }

    /// Switch the completion tab and rebuild the visible list
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.rebuild();
    }

    /// Change the title search text and rebuild the visible list
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.rebuild();
    }

    /// Change the sort key and rebuild the visible list
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.rebuild();
    }

    /// Create a new task and refetch the list so the backend-assigned
    /// row appears.
    pub async fn add(&mut self, draft: &TaskDraft) -> AppResult<()> {
        self.store.insert_task(draft).await?;
        self.refresh().await
    }

    /// Mark a task complete on the backend.
    ///
    /// The local list is not touched: callers show a success notice for
    /// [`COMPLETE_NOTICE`] and then call [`refresh`](Self::refresh), so
    /// the task stays visible until the refreshed list arrives.
    pub async fn complete(&mut self, task_id: i64) -> AppResult<()> {
        debug!(task_id, "completing task");
        let patch = TaskPatch::new().mark_complete();
        self.store.update_task(task_id, &patch).await?;
        Ok(())
    }

    /// Delete a task remotely, then drop it from the local list.
    ///
    /// No refetch is needed: on success the row is removed from the
    /// loaded list directly. On failure the list is unchanged.
    pub async fn delete(&mut self, task_id: i64) -> AppResult<()> {
        debug!(task_id, "deleting task");
        self.store.delete_task(task_id).await?;
        self.all_tasks.retain(|task| task.id != task_id);
        self.rebuild();
        Ok(())
    }

    /// Apply a partial update to a task, then refetch the list.
    pub async fn update(&mut self, task_id: i64, patch: &TaskPatch) -> AppResult<()> {
        debug!(task_id, "updating task");
        self.store.update_task(task_id, patch).await?;
        self.refresh().await
    }

    /// Flip one checklist item's checked state.
    ///
    /// The flip is applied locally first, then persisted. A failed
    /// write is reported but the local flip is kept; the next refresh
    /// reconciles with the backend.
    pub async fn toggle_checklist_item(&mut self, task_id: i64, index: usize) -> AppResult<()> {
        let task = self
            .all_tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or(AppError::TaskNotFound { task_id })?;

        let mut items = task.checklist_items()?;
        if index >= items.len() {
            return Err(AppError::ChecklistIndex {
                task_id,
                index,
                len: items.len(),
            });
        }

        items[index].checked = !items[index].checked;
        debug!(task_id, index, checked = items[index].checked, "toggled checklist item");

        task.set_checklist_items(&items);
        self.rebuild();

        let patch = TaskPatch::new().with_checklist(&items);
        if let Err(e) = self.store.update_task(task_id, &patch).await {
            warn!(task_id, error = %e, "checklist write failed, keeping local state");
            return Err(e.into());
        }
        Ok(())
    }

    /// Append a checklist item to a task and persist the new list.
    pub async fn add_checklist_item(
        &mut self,
        task_id: i64,
        text: impl Into<String>,
    ) -> AppResult<()> {
        let task = self
            .all_tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or(AppError::TaskNotFound { task_id })?;

        let mut items = task.checklist_items()?;
        items.push(ChecklistItem::new(text));
        task.set_checklist_items(&items);
        self.rebuild();

        let patch = TaskPatch::new().with_checklist(&items);
        self.store.update_task(task_id, &patch).await?;
        Ok(())
    }

    /// Open a change feed on the tasks table.
    ///
    /// Events carry no row data; on each event the caller refreshes the
    /// whole list.
    pub async fn watch(&self) -> AppResult<ChangeFeed> {
        let feed = self.store.subscribe_changes(TASKS_TABLE).await?;
        Ok(feed)
    }
}
