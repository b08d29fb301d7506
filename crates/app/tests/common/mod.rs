//! Test infrastructure for view model integration tests
//!
//! Provides an in-memory store fake with per-operation failure switches
//! so tests can observe what the view model does when the backend is
//! healthy or down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use ticklist_store::{
    ChangeEvent, ChangeFeed, ChecklistItem, Priority, Session, StoreError, StoreResult, Task,
    TaskDraft, TaskPatch, TaskStore,
};

/// In-memory [`TaskStore`] fake
///
/// Holds tasks behind a mutex and applies patches the way the backend
/// would. Each mutating operation has a failure switch; when set, the
/// operation errors without touching the stored rows.
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    next_id: Mutex<i64>,
    pub fail_list: AtomicBool,
    pub fail_insert: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    change_tx: Mutex<Option<mpsc::Sender<ChangeEvent>>>,
}

impl MemoryStore {
    pub fn new(tasks: Vec<Task>) -> Arc<Self> {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            tasks: Mutex::new(tasks),
            next_id: Mutex::new(next_id),
            fail_list: AtomicBool::new(false),
            fail_insert: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            change_tx: Mutex::new(None),
        })
    }

    /// Snapshot the stored rows
    pub fn rows(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    /// Sender for pushing change events into a subscribed feed
    pub fn change_sender(&self) -> mpsc::Sender<ChangeEvent> {
        self.change_tx
            .lock()
            .unwrap()
            .clone()
            .expect("no active subscription")
    }

    fn backend_error() -> StoreError {
        StoreError::Request {
            status: 500,
            message: "simulated backend failure".to_string(),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, draft: &TaskDraft) -> StoreResult<()> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let task = serde_json::from_value(serde_json::json!({
            "id": id,
            "user_id": draft.user_id,
            "task": draft.title,
            "description": draft.description,
            "priority": draft.priority,
            "date_start": draft.date_start,
            "due_date": draft.due_date,
            "checklist": draft.checklist,
            "is_complete": false,
        }))
        .unwrap();

        // newest first, matching the fetch order
        self.tasks.lock().unwrap().insert(0, task);
        Ok(())
    }

    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> StoreResult<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        let mut tasks = self.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
            if let Some(title) = &patch.title {
                task.title = title.clone();
            }
            if let Some(description) = &patch.description {
                task.description = Some(description.clone());
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(date_start) = patch.date_start {
                task.date_start = Some(date_start);
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = Some(due_date);
            }
            if let Some(checklist) = &patch.checklist {
                task.checklist = Some(checklist.clone());
            }
            if let Some(is_complete) = patch.is_complete {
                task.is_complete = is_complete;
            }
        }
        Ok(())
    }

    async fn delete_task(&self, task_id: i64) -> StoreResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }
        self.tasks.lock().unwrap().retain(|t| t.id != task_id);
        Ok(())
    }

    async fn subscribe_changes(&self, _table: &str) -> StoreResult<ChangeFeed> {
        let (tx, rx) = mpsc::channel(8);
        *self.change_tx.lock().unwrap() = Some(tx);
        Ok(ChangeFeed::from_channel(rx))
    }
}

/// Session used across the view model tests
pub fn test_session() -> Session {
    Session::new("user-1", "test-token")
}

/// Build a task row for `user-1`
pub fn task(id: i64, title: &str, complete: bool) -> Task {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "user_id": "user-1",
        "task": title,
        "is_complete": complete,
    }))
    .unwrap()
}

/// Build a task row with a priority
pub fn task_with_priority(id: i64, title: &str, priority: Priority) -> Task {
    let mut t = task(id, title, false);
    t.priority = priority;
    t
}

/// Build a task row carrying a checklist
pub fn task_with_checklist(id: i64, title: &str, items: &[ChecklistItem]) -> Task {
    let mut t = task(id, title, false);
    t.set_checklist_items(items);
    t
}
