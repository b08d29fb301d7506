//! Output formatting module for Ticklist
//!
//! Provides table formatting and display utilities for CLI output.

use ticklist_store::{ChecklistItem, Task};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 40;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

fn due_column(task: &Task) -> String {
    task.due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn status_column(task: &Task) -> &'static str {
    if task.is_complete { "done" } else { "open" }
}

/// Format tasks into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID  Title            Priority  Due         Status
/// --  ---------------  --------  ----------  ------
/// 12  Buy milk         high      2025-03-10  open
/// ```
pub fn format_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let headers = ["ID", "Title", "Priority", "Due", "Status"];

    let rows: Vec<[String; 5]> = tasks
        .iter()
        .map(|task| {
            [
                task.id.to_string(),
                truncate(&task.title, MAX_TITLE_WIDTH),
                task.priority.to_string(),
                due_column(task),
                status_column(task).to_string(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].len())
                .max()
                .unwrap_or(0)
                .max(headers[col].len())
        })
        .collect();

    let mut out = String::new();

    for (col, header) in headers.iter().enumerate() {
        if col > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", header, width = widths[col]));
    }
    out.push('\n');

    for (col, width) in widths.iter().enumerate() {
        if col > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');

    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", cell, width = widths[col]));
        }
        out.push('\n');
    }

    out
}

/// Format a task's checklist as numbered lines with check marks.
pub fn format_checklist(title: &str, items: &[ChecklistItem]) -> String {
    if items.is_empty() {
        return format!("{}: no checklist items", title);
    }

    let mut out = format!("{}:\n", title);
    for (position, item) in items.iter().enumerate() {
        let mark = if item.checked { "x" } else { " " };
        out.push_str(&format!("  {}. [{}] {}\n", position + 1, mark, item.text));
    }
    out.pop();
    out
}
