//! Todo Entity
//!
//! A single task record owned by one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority level, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Strict parse; unknown values are rejected rather than defaulted
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Priority::Low => "🟢",
            Priority::Medium => "🟡",
            Priority::High => "🔴",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Todo record as stored by the hosted service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Where a due date sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Upcoming,
}

impl DueStatus {
    pub fn of(due: NaiveDate, today: NaiveDate) -> Self {
        match due.cmp(&today) {
            std::cmp::Ordering::Less => DueStatus::Overdue,
            std::cmp::Ordering::Equal => DueStatus::Today,
            std::cmp::Ordering::Greater => DueStatus::Upcoming,
        }
    }

    /// Suffix shown after the formatted date
    pub fn suffix(&self) -> &'static str {
        match self {
            DueStatus::Overdue => " (Overdue)",
            DueStatus::Today => " (Today!)",
            DueStatus::Upcoming => "",
        }
    }
}

impl Todo {
    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        self.due_date.map(|due| DueStatus::of(due, today))
    }

    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due_date == Some(day)
    }
}

/// Insert payload; id, created_at and user_id are assigned on the service side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority,
            completed: false,
        }
    }
}

/// Partial update. Outer `None` leaves a column untouched; for the nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_priority_ordering_and_parse() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_todo_deserializes_service_row() {
        let row = json!({
            "id": "6f1c2a8e-0c4e-4c1e-9d55-3a1f0f1f2b10",
            "title": "Buy milk",
            "description": null,
            "due_date": "2026-10-20",
            "priority": "high",
            "completed": false,
            "created_at": "2026-10-19T08:30:00.123456+00:00",
            "user_id": "0b8a3f8a-7f0e-4a61-9d0b-6c1d5b9a2e11"
        });
        let todo: Todo = serde_json::from_value(row).unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.due_date, Some(day("2026-10-20")));
        assert!(todo.description.is_none());
    }

    #[test]
    fn test_due_status() {
        let today = day("2026-10-19");
        assert_eq!(DueStatus::of(day("2026-10-18"), today), DueStatus::Overdue);
        assert_eq!(DueStatus::of(today, today), DueStatus::Today);
        assert_eq!(DueStatus::of(day("2026-11-01"), today), DueStatus::Upcoming);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = TodoPatch::completed(true);
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "completed": true }));

        let clear = TodoPatch {
            description: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&clear).unwrap(), json!({ "description": null }));
        assert_eq!(serde_json::to_value(TodoPatch::default()).unwrap(), json!({}));
    }
}
