//! Error types for the view model layer.

use thiserror::Error;
use ticklist_store::StoreError;

/// Errors produced by view model operations
#[derive(Error, Debug)]
pub enum AppError {
    /// The underlying store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The referenced task is not in the loaded list
    #[error("task not found: {task_id}")]
    TaskNotFound { task_id: i64 },

    /// A checklist index points past the end of the task's checklist
    #[error("checklist index {index} out of range for task {task_id} ({len} items)")]
    ChecklistIndex {
        task_id: i64,
        index: usize,
        len: usize,
    },
}

/// Result type alias for view model operations
pub type AppResult<T> = Result<T, AppError>;
