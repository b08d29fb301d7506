//! Remote store module for Ticklist
//!
//! Provides authentication, the REST-backed task store, and the
//! coarse realtime change feed, all against a hosted Supabase-style
//! backend.

pub mod auth;
pub mod checklist;
pub mod error;
pub mod models;
pub mod realtime;
pub mod rest;
pub mod store;

pub use auth::{AuthClient, Session};
pub use checklist::ChecklistItem;
pub use error::{StoreError, StoreResult};
pub use models::{Priority, Task, TaskDraft, TaskPatch};
pub use rest::SupabaseStore;
pub use store::{ChangeEvent, ChangeFeed, ChangeKind, TaskStore};

/// Table holding task rows
pub const TASKS_TABLE: &str = "todos";

/// Connection settings for the backend project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub url: String,
    /// Project anon API key
    pub anon_key: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Read connection settings from `TICKLIST_URL` and
    /// `TICKLIST_ANON_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` naming the missing variable.
    pub fn from_env() -> StoreResult<Self> {
        let url = std::env::var("TICKLIST_URL").map_err(|_| StoreError::Config {
            reason: "TICKLIST_URL is not set".to_string(),
        })?;
        let anon_key = std::env::var("TICKLIST_ANON_KEY").map_err(|_| StoreError::Config {
            reason: "TICKLIST_ANON_KEY is not set".to_string(),
        })?;
        Ok(Self::new(url, anon_key))
    }
}
