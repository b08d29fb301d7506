//! Store trait boundary and realtime change feed types.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::StoreResult;
use crate::models::{Task, TaskDraft, TaskPatch};

/// Kind of row change reported by the realtime feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    /// Map a realtime event name to a change kind, `None` for
    /// protocol-level events (joins, replies, heartbeats).
    pub fn from_event(event: &str) -> Option<Self> {
        match event {
            "INSERT" => Some(ChangeKind::Insert),
            "UPDATE" => Some(ChangeKind::Update),
            "DELETE" => Some(ChangeKind::Delete),
            _ => None,
        }
    }
}

/// A single row change on a subscribed table
///
/// Carries no row payload: consumers are expected to refetch the table
/// on any change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub table: String,
}

/// Receiving end of a realtime subscription
///
/// Dropping the feed tears down the underlying connection task.
pub struct ChangeFeed {
    rx: mpsc::Receiver<ChangeEvent>,
    task: Option<JoinHandle<()>>,
}

impl ChangeFeed {
    /// Build a feed from a bare channel, with no connection task to manage
    pub fn from_channel(rx: mpsc::Receiver<ChangeEvent>) -> Self {
        Self { rx, task: None }
    }

    /// Build a feed whose connection task is aborted when the feed drops
    pub fn with_task(rx: mpsc::Receiver<ChangeEvent>, task: JoinHandle<()>) -> Self {
        Self {
            rx,
            task: Some(task),
        }
    }

    /// Wait for the next change, `None` once the connection is gone
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        self.rx.recv().await
    }
}

impl Drop for ChangeFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Remote task storage operations
///
/// Implemented over the hosted backend in production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch all tasks belonging to a user, newest first
    async fn list_tasks(&self, user_id: &str) -> StoreResult<Vec<Task>>;

    /// Insert a new task; the backend assigns the id
    async fn insert_task(&self, draft: &TaskDraft) -> StoreResult<()>;

    /// Apply a partial update to one task
    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> StoreResult<()>;

    /// Delete one task
    async fn delete_task(&self, task_id: i64) -> StoreResult<()>;

    /// Open a realtime feed of row changes on a table
    async fn subscribe_changes(&self, table: &str) -> StoreResult<ChangeFeed>;
}
