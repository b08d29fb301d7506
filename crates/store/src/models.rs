//! Data models for the Ticklist remote store.
//!
//! Defines Rust types that map to the backend `todos` table, plus the
//! insert and partial-update payload builders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::checklist::{self, ChecklistItem};
use crate::error::StoreResult;

/// Task priority level
///
/// Stored as lowercase text on the backend. Values the client does not
/// recognize decode to `Other`, which sorts after the known levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    #[serde(other)]
    Other,
}

impl Priority {
    /// Returns the string representation used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other => "other",
        }
    }

    /// Parse a priority string, `None` for unrecognized values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Sort rank: high < medium < low < other
    pub fn sort_rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Other => 3,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accept a null priority column as the default (medium).
fn de_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Priority>::deserialize(deserializer)?.unwrap_or_default())
}

/// A task record as stored on the backend
///
/// The `checklist` column is kept in its raw stored form; use
/// [`Task::checklist_items`] to decode it into structured items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier, unique per user, never reused
    pub id: i64,

    /// Owning user (never changes after creation)
    pub user_id: String,

    /// Task title
    #[serde(rename = "task")]
    pub title: String,

    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Priority level
    #[serde(default, deserialize_with = "de_priority")]
    pub priority: Priority,

    /// Optional start date
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    /// Raw checklist column as stored by the backend
    #[serde(default)]
    pub checklist: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub is_complete: bool,

    /// Insertion timestamp, set by the backend; default sort key
    #[serde(default)]
    pub inserted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Decode the stored checklist column into structured items.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedChecklist` if the column holds
    /// unparsable text.
    pub fn checklist_items(&self) -> StoreResult<Vec<ChecklistItem>> {
        checklist::decode(self.id, self.checklist.as_deref())
    }

    /// Replace the stored checklist column with a re-encoded item sequence.
    pub fn set_checklist_items(&mut self, items: &[ChecklistItem]) {
        self.checklist = Some(checklist::encode(items));
    }
}

/// Insert payload for a new task
///
/// Only the fields the user provided are transmitted; the backend fills
/// in `id` and `inserted_at`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    #[serde(rename = "task")]
    pub title: String,

    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub priority: Priority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist: Option<String>,
}

impl TaskDraft {
    /// Create a draft with the required fields and default priority
    pub fn new(title: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            user_id: user_id.into(),
            description: None,
            priority: Priority::default(),
            date_start: None,
            due_date: None,
            checklist: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the start date
    pub fn with_date_start(mut self, date_start: DateTime<Utc>) -> Self {
        self.date_start = Some(date_start);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Attach a checklist (encoded into the opaque column format)
    pub fn with_checklist(mut self, items: &[ChecklistItem]) -> Self {
        if !items.is_empty() {
            self.checklist = Some(checklist::encode(items));
        }
        self
    }
}

/// Partial-update payload for an existing task
///
/// Serializes only the fields that were set, so an empty patch produces
/// an empty body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    /// New title (if Some)
    #[serde(rename = "task", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description (if Some)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New priority (if Some)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// New start date (if Some)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_start: Option<DateTime<Utc>>,

    /// New due date (if Some)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Re-encoded checklist column (if Some)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist: Option<String>,

    /// New completion flag (if Some)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

impl TaskPatch {
    /// Create a new empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a new priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set a new start date
    pub fn with_date_start(mut self, date_start: DateTime<Utc>) -> Self {
        self.date_start = Some(date_start);
        self
    }

    /// Set a new due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replace the checklist with a re-encoded item sequence
    pub fn with_checklist(mut self, items: &[ChecklistItem]) -> Self {
        self.checklist = Some(checklist::encode(items));
        self
    }

    /// Mark the task complete
    pub fn mark_complete(mut self) -> Self {
        self.is_complete = Some(true);
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.priority.is_some()
            || self.date_start.is_some()
            || self.due_date.is_some()
            || self.checklist.is_some()
            || self.is_complete.is_some()
    }
}
