//! Pure derivation of the visible task list.
//!
//! Filtering, search, and sorting are a function of the loaded tasks
//! and the current view settings only, so the same inputs always yield
//! the same visible list.

use ticklist_store::Task;

/// Completion filter tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Every task regardless of completion
    #[default]
    All,
    /// Tasks not yet completed
    InProgress,
    /// Completed tasks
    Completed,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::InProgress => "in-progress",
            Tab::Completed => "completed",
        }
    }

    /// Parse a tab name, `None` for unrecognized values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Tab::All),
            "in-progress" | "in_progress" => Some(Tab::InProgress),
            "completed" | "done" => Some(Tab::Completed),
            _ => None,
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Tab::All => true,
            Tab::InProgress => !task.is_complete,
            Tab::Completed => task.is_complete,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering applied to the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the fetch order (newest first)
    #[default]
    None,
    /// High priority first, unknown priorities last
    Priority,
    /// Earliest due date first, tasks without one last
    DueDate,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Priority => "priority",
            SortKey::DueDate => "due-date",
        }
    }

    /// Parse a sort key name, `None` for unrecognized values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(SortKey::None),
            "priority" => Some(SortKey::Priority),
            "due-date" | "due_date" | "due" => Some(SortKey::DueDate),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute the visible list from the loaded tasks and view settings.
///
/// Applies the tab filter, then a case-insensitive title search, then a
/// stable sort. With `SortKey::None` the fetch order is preserved;
/// ties under the other keys keep their fetch order too.
pub fn derive_view(tasks: &[Task], tab: Tab, search: &str, sort: SortKey) -> Vec<Task> {
    let needle = search.trim().to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| tab.matches(task))
        .filter(|task| needle.is_empty() || task.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        SortKey::None => {}
        SortKey::Priority => {
            visible.sort_by_key(|task| task.priority.sort_rank());
        }
        SortKey::DueDate => {
            // missing due dates sort after every dated task
            visible.sort_by_key(|task| (task.due_date.is_none(), task.due_date));
        }
    }

    visible
}
