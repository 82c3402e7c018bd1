//! Storage port trait definitions.

use async_trait::async_trait;
use entities::{Label, Task, User};

use crate::StoreResult;

/// Filter options for listing tasks. `None` means no constraint on that
/// field; both predicates are ANDed when both are set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    /// Only return the task with this id.
    pub id: Option<i64>,
    /// Only return tasks authored by this user.
    pub author_id: Option<i64>,
}

impl TaskFilter {
    /// Creates an empty filter matching every task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to a single task id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts the listing to one author.
    pub fn with_author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }
}

/// Trait for task storage operations.
///
/// The shell depends only on this contract; the concrete backend is
/// constructed once at startup and injected, fixed for the process lifetime.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists tasks matching `filter`, ordered by id ascending.
    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;

    /// Persists a task plus one association per label id and returns the new
    /// task id. The task row and its associations are a single atomic unit.
    async fn create_task(&self, task: &Task, label_ids: &[i64]) -> StoreResult<i64>;

    /// Replaces the mutable fields (title, content, author, assignee) of the
    /// task matching `task.id`. Succeeds without effect when no such task
    /// exists.
    async fn update_task(&self, task: &Task) -> StoreResult<()>;

    /// Deletes a task by id. Succeeds without effect when no such task
    /// exists, so a repeated delete is also a success.
    async fn delete_task(&self, id: i64) -> StoreResult<()>;

    /// Lists all labels, ordered by id ascending.
    async fn list_labels(&self) -> StoreResult<Vec<Label>>;

    /// Creates a label and returns its id.
    async fn create_label(&self, label: &Label) -> StoreResult<i64>;

    /// Lists all users, ordered by id ascending.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Creates a user and returns its id.
    async fn create_user(&self, user: &User) -> StoreResult<i64>;

    /// Lists tasks authored by `author_id` in creation order. Returns an
    /// empty vec, not an error, when none match.
    async fn tasks_by_author(&self, author_id: i64) -> StoreResult<Vec<Task>>;

    /// Releases any held connection. Idempotent; safe to call on shutdown
    /// regardless of backend.
    async fn close(&self);
}
