//! Test infrastructure for CLI integration tests
//!
//! Provides an in-memory store and a ready-to-use view model, so
//! commands can be executed without a backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use ticklist_app::TaskListViewModel;
use ticklist_store::{
    ChangeEvent, ChangeFeed, Session, StoreResult, Task, TaskDraft, TaskPatch, TaskStore,
};

/// In-memory [`TaskStore`] used by command tests
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    next_id: Mutex<i64>,
    change_tx: Mutex<Option<mpsc::Sender<ChangeEvent>>>,
}

impl MemoryStore {
    pub fn new(tasks: Vec<Task>) -> Arc<Self> {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            tasks: Mutex::new(tasks),
            next_id: Mutex::new(next_id),
            change_tx: Mutex::new(None),
        })
    }

    /// Snapshot the stored rows
    pub fn rows(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    /// Sender for pushing change events into a subscribed feed
    pub fn change_sender(&self) -> mpsc::Sender<ChangeEvent> {
        self.change_sender_opt().expect("no active subscription")
    }

    /// Like [`change_sender`](Self::change_sender) but without
    /// panicking when nothing has subscribed yet
    pub fn change_sender_opt(&self) -> Option<mpsc::Sender<ChangeEvent>> {
        self.change_tx.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, user_id: &str) -> StoreResult<Vec<Task>> {
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

        self.tasks.lock().unwrap().insert(0, task);
        Ok(())
    }

    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> StoreResult<()> {
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
        self.tasks.lock().unwrap().retain(|t| t.id != task_id);
        Ok(())
    }

    async fn subscribe_changes(&self, _table: &str) -> StoreResult<ChangeFeed> {
        let (tx, rx) = mpsc::channel(8);
        *self.change_tx.lock().unwrap() = Some(tx);
        Ok(ChangeFeed::from_channel(rx))
    }
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

/// View model over a fresh memory store seeded with the given rows
pub fn test_vm(tasks: Vec<Task>) -> (Arc<MemoryStore>, TaskListViewModel<MemoryStore>) {
    let store = MemoryStore::new(tasks);
    let session = Session::new("user-1", "test-token");
    let vm = TaskListViewModel::new(store.clone(), session);
    (store, vm)
}
