/// JSON-file-backed store implementation
///
/// All state lives in memory behind an `RwLock`; queries are full scans.
/// Every mutation rewrites the whole snapshot file before it commits to the
/// in-memory state, so a mutation whose snapshot write failed is never
/// observable and the file is always a complete, self-consistent copy of
/// what the process last acknowledged.
///
/// # Snapshot layout
///
/// ```json
/// {
///   "users": [ ... ],
///   "tasks": [ ... ],
///   "nextUserId": 3,
///   "nextTaskId": 12
/// }
/// ```
///
/// A missing or unparsable file at open time is not fatal: the store starts
/// empty with both counters at 1 and logs a warning.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::task::{Task, TaskPriority, TaskStats, TaskStatus};
use crate::models::user::User;

use super::{NewTask, NewUser, Store, StoreError, TaskChanges, TaskFilter};

/// Complete persisted state: every record plus both ID counters
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    users: Vec<User>,

    tasks: Vec<Task>,

    #[serde(rename = "nextUserId")]
    next_user_id: u64,

    #[serde(rename = "nextTaskId")]
    next_task_id: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            tasks: Vec::new(),
            next_user_id: 1,
            next_task_id: 1,
        }
    }
}

/// Store keeping all state in memory, mirrored to one JSON file
pub struct JsonStore {
    path: PathBuf,
    state: RwLock<Snapshot>,
}

impl JsonStore {
    /// Opens a store backed by the file at `path`
    ///
    /// Reads the snapshot if the file exists. A missing file means a fresh
    /// store; an unreadable or unparsable file is logged as a warning and
    /// also yields a fresh store, never an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let snapshot = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Could not parse snapshot file, starting fresh"
                    );
                    Snapshot::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Could not read snapshot file, starting fresh"
                );
                Snapshot::default()
            }
        };

        Self {
            path,
            state: RwLock::new(snapshot),
        }
    }

    /// Serializes `snapshot` and overwrites the backing file
    ///
    /// Called with the write lock held, so readers never observe a state
    /// the file does not also hold.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn create_user(&self, data: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::EmailTaken);
        }

        let mut next = (*state).clone();
        let user = User {
            id: next.next_user_id,
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        next.next_user_id += 1;
        next.users.push(user.clone());

        self.save(&next).await?;
        *state = next;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: u64) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_tasks(
        &self,
        user_id: u64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError> {
        let state = self.state.read().await;

        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| {
                filter
                    .status
                    .as_deref()
                    .map_or(true, |s| t.status.as_str() == s)
            })
            .filter(|t| {
                filter
                    .priority
                    .as_deref()
                    .map_or(true, |p| t.priority.as_str() == p)
            })
            .cloned()
            .collect();

        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(tasks)
    }

    async fn find_task(&self, user_id: u64, task_id: u64) -> Result<Option<Task>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .find(|t| t.id == task_id && t.user_id == user_id)
            .cloned())
    }

    async fn create_task(&self, data: NewTask) -> Result<Task, StoreError> {
        let mut state = self.state.write().await;

        let mut next = (*state).clone();
        let now = Utc::now();
        let task = Task {
            id: next.next_task_id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Pending,
            priority: data.priority,
            created_at: now,
            updated_at: now,
        };
        next.next_task_id += 1;
        next.tasks.push(task.clone());

        self.save(&next).await?;
        *state = next;

        Ok(task)
    }

    async fn update_task(
        &self,
        user_id: u64,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let mut state = self.state.write().await;

        let mut next = (*state).clone();
        let task = match next
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.user_id == user_id)
        {
            Some(task) => task,
            None => return Ok(None),
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        task.updated_at = Utc::now();
        let updated = task.clone();

        self.save(&next).await?;
        *state = next;

        Ok(Some(updated))
    }

    async fn delete_task(&self, user_id: u64, task_id: u64) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;

        let mut next = (*state).clone();
        let before = next.tasks.len();
        next.tasks
            .retain(|t| !(t.id == task_id && t.user_id == user_id));

        if next.tasks.len() == before {
            return Ok(false);
        }

        self.save(&next).await?;
        *state = next;

        Ok(true)
    }

    async fn task_stats(&self, user_id: u64) -> Result<TaskStats, StoreError> {
        let state = self.state.read().await;

        let mut stats = TaskStats::default();
        for task in state.tasks.iter().filter(|t| t.user_id == user_id) {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            if task.priority == TaskPriority::High {
                stats.high_priority += 1;
            }
        }

        Ok(stats)
    }
}
