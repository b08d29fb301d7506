//! Checklist items and the opaque-text codec.
//!
//! The backend stores a task's checklist as a single text column holding a
//! JSON array. This module owns the item type, client-side id allocation,
//! and the encode/decode round trip.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

static NEXT_ITEM_ID: AtomicI64 = AtomicI64::new(0);

/// A single checklist entry within a task
///
/// Item ids are assigned client-side at creation time and are unique
/// within their task; they are never reused after an item is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Client-assigned identifier, unique within the task
    pub id: i64,

    /// The item label
    pub text: String,

    /// Whether the item has been ticked off
    pub checked: bool,
}

impl ChecklistItem {
    /// Create a new unchecked item with a freshly allocated id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: next_item_id(),
            text: text.into(),
            checked: false,
        }
    }

    /// Create an item with an explicit id (used when rebuilding from stored data)
    pub fn with_id(id: i64, text: impl Into<String>, checked: bool) -> Self {
        Self {
            id,
            text: text.into(),
            checked,
        }
    }
}

/// Allocate a checklist item id.
///
/// Ids are seeded from the current Unix time in milliseconds and
/// strictly increase across calls, so items created within the same
/// millisecond (a multi-item insert) still get distinct ids.
pub fn next_item_id() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);

    let prev = NEXT_ITEM_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |prev| {
            Some(now.max(prev + 1))
        })
        .unwrap_or_else(|prev| prev);
    now.max(prev + 1)
}

/// Encode an ordered item sequence into the opaque text column format.
pub fn encode(items: &[ChecklistItem]) -> String {
    // Serialization of this shape cannot fail; fall back to the empty list
    // rather than propagating an impossible error.
    serde_json::to_string(items).unwrap_or_else(|_| String::from("[]"))
}

/// Decode the opaque text column back into an ordered item sequence.
///
/// A null/absent column decodes to the empty list. Unparsable text is
/// reported as `StoreError::MalformedChecklist` with the owning task id.
pub fn decode(task_id: i64, column: Option<&str>) -> StoreResult<Vec<ChecklistItem>> {
    match column {
        None => Ok(Vec::new()),
        Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(raw) => {
            serde_json::from_str(raw).map_err(|e| StoreError::MalformedChecklist {
                task_id,
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new_is_unchecked() {
        let item = ChecklistItem::new("buy milk");
        assert_eq!(item.text, "buy milk");
        assert!(!item.checked);
        assert!(item.id > 0);
    }

    #[test]
    fn test_item_ids_distinct_within_a_batch() {
        let items: Vec<ChecklistItem> = (0..5)
            .map(|n| ChecklistItem::new(format!("step {}", n)))
            .collect();

        let mut ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_next_item_id_strictly_increases() {
        let first = next_item_id();
        let second = next_item_id();
        let third = next_item_id();
        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn test_item_with_id() {
        let item = ChecklistItem::with_id(42, "pay rent", true);
        assert_eq!(item.id, 42);
        assert_eq!(item.text, "pay rent");
        assert!(item.checked);
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let items = vec![
            ChecklistItem::with_id(1, "first", false),
            ChecklistItem::with_id(2, "second", true),
            ChecklistItem::with_id(3, "third", false),
        ];

        let encoded = encode(&items);
        let decoded = decode(9, Some(&encoded)).unwrap();

        assert_eq!(decoded, items);
    }

    #[test]
    fn test_round_trip_empty_list() {
        let encoded = encode(&[]);
        assert_eq!(encoded, "[]");

        let decoded = decode(1, Some(&encoded)).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_null_column_is_empty() {
        let decoded = decode(1, None).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_blank_column_is_empty() {
        let decoded = decode(1, Some("   ")).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_malformed_text_reports_task() {
        let err = decode(17, Some("{not json")).unwrap_err();
        match err {
            StoreError::MalformedChecklist { task_id, .. } => assert_eq!(task_id, 17),
            other => panic!("expected MalformedChecklist, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_accepts_millisecond_ids() {
        let raw = r#"[{"id":1741067370123,"text":"a","checked":false}]"#;
        let decoded = decode(1, Some(raw)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, 1741067370123);
        assert_eq!(decoded[0].text, "a");
        assert!(!decoded[0].checked);
    }

    #[test]
    fn test_encode_serializes_all_fields() {
        let items = vec![ChecklistItem::with_id(5, "check", true)];
        let value: serde_json::Value = serde_json::from_str(&encode(&items)).unwrap();
        assert_eq!(value[0]["id"], 5);
        assert_eq!(value[0]["text"], "check");
        assert_eq!(value[0]["checked"], true);
    }
}
