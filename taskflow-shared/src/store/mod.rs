/// Persistent store for users and tasks
///
/// The [`Store`] trait is the sole authority over durable state: every read
/// and write of users and tasks goes through it. Handlers depend on the
/// trait, not on a concrete backend, so a transactional database can later
/// replace the file-backed implementation without touching service logic.
///
/// The shipped implementation is [`JsonStore`], which mirrors the full
/// in-memory state to a single JSON file after every successful mutation.
///
/// # Identifier allocation
///
/// Both user and task IDs come from counters owned by the store. Counters
/// only ever move forward and are persisted with the data, so IDs are never
/// reused, even across deletes and restarts.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::store::{JsonStore, NewTask, Store, TaskFilter};
/// use taskflow_shared::models::task::TaskPriority;
///
/// # async fn example() -> Result<(), taskflow_shared::store::StoreError> {
/// let store = JsonStore::open("data.json");
///
/// let task = store
///     .create_task(NewTask {
///         user_id: 1,
///         title: "Buy milk".to_string(),
///         description: None,
///         priority: TaskPriority::default(),
///     })
///     .await?;
///
/// let tasks = store.list_tasks(1, &TaskFilter::default()).await?;
/// assert_eq!(tasks[0].id, task.id);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::task::{Task, TaskPriority, TaskStats, TaskStatus};
use crate::models::user::User;

mod json;

pub use json::JsonStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The email is already registered to another account
    #[error("Email already registered")]
    EmailTaken,

    /// Writing the snapshot file failed
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the snapshot failed
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,

    /// Email address, must not already be registered
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Owning user
    pub user_id: u64,

    /// Title, already validated as non-empty by the caller
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Priority, defaulted by the caller when the client omitted it
    pub priority: TaskPriority,
}

/// Partial field replacement for a task update
///
/// `None` leaves a field untouched. `description` is doubly optional so a
/// client can clear it: `Some(None)` sets it to null, `Some(Some(text))`
/// replaces it.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    /// New title
    pub title: Option<String>,

    /// New description (use `Some(None)` to clear)
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,
}

impl TaskChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Optional exact-match filters for task listing, AND semantics
///
/// Values are the raw wire strings: a value that names no known status or
/// priority simply matches no tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Keep only tasks whose status serializes to this string
    pub status: Option<String>,

    /// Keep only tasks whose priority serializes to this string
    pub priority: Option<String>,
}

/// Durable state operations, all scoped where applicable
///
/// Task lookups take the owning user's ID alongside the task ID; ownership
/// and existence are one inseparable check, so a task owned by another user
/// is indistinguishable from a nonexistent one.
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates a user, rejecting a duplicate email with
    /// [`StoreError::EmailTaken`] (case-sensitive exact match)
    async fn create_user(&self, data: NewUser) -> Result<User, StoreError>;

    /// Finds a user by email (case-sensitive exact match)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by ID
    async fn find_user_by_id(&self, id: u64) -> Result<Option<User>, StoreError>;

    /// Lists a user's tasks matching `filter`, newest first
    async fn list_tasks(&self, user_id: u64, filter: &TaskFilter)
        -> Result<Vec<Task>, StoreError>;

    /// Finds a task owned by `user_id`
    async fn find_task(&self, user_id: u64, task_id: u64) -> Result<Option<Task>, StoreError>;

    /// Creates a task in pending status with the next global ID
    async fn create_task(&self, data: NewTask) -> Result<Task, StoreError>;

    /// Applies `changes` to a task owned by `user_id`, refreshing its
    /// updated timestamp; `None` when no such task exists
    async fn update_task(
        &self,
        user_id: u64,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError>;

    /// Hard-deletes a task owned by `user_id`; `false` when no such task
    /// exists
    async fn delete_task(&self, user_id: u64, task_id: u64) -> Result<bool, StoreError>;

    /// Computes aggregate counts over a user's tasks by full scan
    async fn task_stats(&self, user_id: u64) -> Result<TaskStats, StoreError>;
}
