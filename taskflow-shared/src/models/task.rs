/// Task model, status/priority enums, and aggregate statistics
///
/// Tasks are owned by exactly one user and are only ever visible to their
/// owner. IDs come from a single global counter in the store and are never
/// reused, even after deletes.
///
/// # Status lifecycle
///
/// ```text
/// pending → in_progress → completed
/// ```
///
/// Clients normally move tasks forward through this sequence, but an update
/// may set any of the three values directly; the progression is a client
/// convenience, not enforced here.
///
/// # Example
///
/// ```
/// use taskflow_shared::models::task::{TaskPriority, TaskStatus};
///
/// assert_eq!(TaskStatus::default(), TaskStatus::Pending);
/// assert_eq!(TaskPriority::parse("high"), Some(TaskPriority::High));
/// assert_eq!(TaskPriority::parse("urgent"), None);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (the state every task is created in)
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parses the wire/storage string form, `None` for anything else
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Converts priority to its wire/storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Parses the wire/storage string form, `None` for anything else
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task record as held by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID, assigned from a global counter (not per-user)
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    /// Title, always non-empty
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Current priority
    pub priority: TaskPriority,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Aggregate task counts for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// All tasks owned by the user
    pub total: usize,

    /// Tasks with status `pending`
    pub pending: usize,

    /// Tasks with status `in_progress`
    pub in_progress: usize,

    /// Tasks with status `completed`
    pub completed: usize,

    /// Tasks with priority `high`, regardless of status
    pub high_priority: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("done"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn test_priority_string_roundtrip() {
        for priority in [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High] {
            assert_eq!(TaskPriority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(TaskPriority::parse("urgent"), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_enum_wire_form() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            json!("in_progress")
        );
        assert_eq!(
            serde_json::to_value(TaskPriority::High).unwrap(),
            json!("high")
        );
        assert_eq!(
            serde_json::from_value::<TaskStatus>(json!("completed")).unwrap(),
            TaskStatus::Completed
        );
    }

    #[test]
    fn test_task_serializes_null_description() {
        let now = Utc::now();
        let task = Task {
            id: 1,
            user_id: 1,
            title: "Buy milk".to_string(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["description"], serde_json::Value::Null);
        assert_eq!(json["status"], json!("pending"));
        assert_eq!(json["priority"], json!("medium"));
    }

    #[test]
    fn test_stats_default_is_all_zero() {
        let stats = TaskStats::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.high_priority, 0);
    }
}
