//! In-memory storage backend for testing and offline use.

use async_trait::async_trait;
use entities::{Label, Task, User};
use tokio::sync::RwLock;

use crate::{StoreResult, TaskFilter, TaskStore};

/// Process-local task store, functionally equivalent to the PostgreSQL
/// backend but dependency-free. Ids are assigned 1, 2, 3, … per entity kind,
/// so listing order equals creation order. No operation on this backend can
/// fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    labels: Vec<Label>,
    users: Vec<User>,
    // (task_id, label_id) pairs, mirroring the tasks_labels join table.
    task_labels: Vec<(i64, i64)>,
    last_task_id: i64,
    last_label_id: i64,
    last_user_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn label_ids_for(&self, task_id: i64) -> Vec<i64> {
        self.inner
            .read()
            .await
            .task_labels
            .iter()
            .filter(|(t, _)| *t == task_id)
            .map(|(_, l)| *l)
            .collect()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| {
                filter.id.is_none_or(|id| t.id == id)
                    && filter.author_id.is_none_or(|a| t.author_id == a)
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn create_task(&self, task: &Task, label_ids: &[i64]) -> StoreResult<i64> {
        let mut inner = self.inner.write().await;
        inner.last_task_id += 1;
        let id = inner.last_task_id;

        let mut task = task.clone();
        task.id = id;
        inner.tasks.push(task);

        for &label_id in label_ids {
            inner.task_labels.push((id, label_id));
        }
        Ok(id)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        // Missing id is a silent success, matching the relational backend.
        if let Some(existing) = inner.tasks.iter_mut().find(|t| t.id == task.id) {
            existing.title = task.title.clone();
            existing.content = task.content.clone();
            existing.author_id = task.author_id;
            existing.assigned_id = task.assigned_id;
        }
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.tasks.retain(|t| t.id != id);
        inner.task_labels.retain(|(task_id, _)| *task_id != id);
        Ok(())
    }

    async fn list_labels(&self) -> StoreResult<Vec<Label>> {
        let inner = self.inner.read().await;
        Ok(inner.labels.clone())
    }

    async fn create_label(&self, label: &Label) -> StoreResult<i64> {
        let mut inner = self.inner.write().await;
        inner.last_label_id += 1;
        let id = inner.last_label_id;

        let mut label = label.clone();
        label.id = id;
        inner.labels.push(label);
        Ok(id)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.clone())
    }

    async fn create_user(&self, user: &User) -> StoreResult<i64> {
        let mut inner = self.inner.write().await;
        inner.last_user_id += 1;
        let id = inner.last_user_id;

        let mut user = user.clone();
        user.id = id;
        inner.users.push(user);
        Ok(id)
    }

    async fn tasks_by_author(&self, author_id: i64) -> StoreResult<Vec<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .iter()
            .filter(|t| t.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn close(&self) {
        // Nothing held.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_list_orders_by_id() {
        let store = MemoryStore::new();

        let first = store
            .create_task(&Task::new("first", "a", 1, 1), &[])
            .await
            .unwrap();
        let second = store
            .create_task(&Task::new("second", "b", 1, 1), &[])
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let tasks = store.list_tasks(&TaskFilter::new()).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[1].id, 2);
        assert_eq!(tasks[0].title, "first");
        assert_eq!(tasks[1].title, "second");
    }

    #[tokio::test]
    async fn test_list_tasks_filters() {
        let store = MemoryStore::new();
        store
            .create_task(&Task::new("one", "by alice", 1, 1), &[])
            .await
            .unwrap();
        store
            .create_task(&Task::new("two", "by bob", 2, 1), &[])
            .await
            .unwrap();
        store
            .create_task(&Task::new("three", "by alice", 1, 2), &[])
            .await
            .unwrap();

        // Single id.
        let by_id = store
            .list_tasks(&TaskFilter::new().with_id(2))
            .await
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].title, "two");

        // Absent id matches nothing.
        let missing = store
            .list_tasks(&TaskFilter::new().with_id(99))
            .await
            .unwrap();
        assert!(missing.is_empty());

        // Author only.
        let by_author = store
            .list_tasks(&TaskFilter::new().with_author(1))
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        // Both predicates AND.
        let both = store
            .list_tasks(&TaskFilter::new().with_id(3).with_author(1))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        let none = store
            .list_tasks(&TaskFilter::new().with_id(3).with_author(2))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_task_is_silent_success() {
        let store = MemoryStore::new();
        store
            .create_task(&Task::new("keep me", "unchanged", 1, 1), &[])
            .await
            .unwrap();

        let mut ghost = Task::new("ghost", "nobody home", 9, 9);
        ghost.id = 42;
        store.update_task(&ghost).await.unwrap();

        let tasks = store.list_tasks(&TaskFilter::new()).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "keep me");
    }

    #[tokio::test]
    async fn test_update_replaces_mutable_fields_only() {
        let store = MemoryStore::new();
        let id = store
            .create_task(&Task::new("before", "old text", 1, 1), &[])
            .await
            .unwrap();
        let opened = store.list_tasks(&TaskFilter::new()).await.unwrap()[0].opened;

        let mut updated = Task::new("after", "new text", 2, 3);
        updated.id = id;
        store.update_task(&updated).await.unwrap();

        let tasks = store.list_tasks(&TaskFilter::new()).await.unwrap();
        assert_eq!(tasks[0].title, "after");
        assert_eq!(tasks[0].content, "new text");
        assert_eq!(tasks[0].author_id, 2);
        assert_eq!(tasks[0].assigned_id, 3);
        // Lifecycle timestamps stay as created.
        assert_eq!(tasks[0].opened, opened);
        assert_eq!(tasks[0].closed, 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store
            .create_task(&Task::new("doomed", "", 1, 1), &[])
            .await
            .unwrap();

        store.delete_task(id).await.unwrap();
        assert!(store.list_tasks(&TaskFilter::new()).await.unwrap().is_empty());

        // Second delete of the same id is still a success.
        store.delete_task(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_tasks_by_author_returns_matching_subset_in_order() {
        let store = MemoryStore::new();
        store
            .create_task(&Task::new("a1", "", 1, 1), &[])
            .await
            .unwrap();
        store
            .create_task(&Task::new("b1", "", 2, 1), &[])
            .await
            .unwrap();
        store
            .create_task(&Task::new("a2", "", 1, 1), &[])
            .await
            .unwrap();

        let alice = store.tasks_by_author(1).await.unwrap();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].title, "a1");
        assert_eq!(alice[1].title, "a2");

        let nobody = store.tasks_by_author(7).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_label_associations_follow_the_task() {
        let store = MemoryStore::new();
        let urgent = store.create_label(&Label::new("urgent")).await.unwrap();
        let later = store.create_label(&Label::new("later")).await.unwrap();

        let id = store
            .create_task(&Task::new("tagged", "", 1, 1), &[urgent, later])
            .await
            .unwrap();
        assert_eq!(store.label_ids_for(id).await, vec![urgent, later]);

        store.delete_task(id).await.unwrap();
        assert!(store.label_ids_for(id).await.is_empty());
    }

    #[tokio::test]
    async fn test_labels_and_users_get_sequential_ids() {
        let store = MemoryStore::new();

        assert_eq!(store.create_label(&Label::new("red")).await.unwrap(), 1);
        assert_eq!(store.create_label(&Label::new("blue")).await.unwrap(), 2);
        assert_eq!(store.create_user(&User::new("alice")).await.unwrap(), 1);
        assert_eq!(store.create_user(&User::new("bob")).await.unwrap(), 2);

        let labels = store.list_labels().await.unwrap();
        assert_eq!(labels[0].name, "red");
        assert_eq!(labels[1].name, "blue");

        let users = store.list_users().await.unwrap();
        assert_eq!(users[0].name, "alice");
        assert_eq!(users[1].name, "bob");
    }

    #[tokio::test]
    async fn test_single_user_single_task_round_trip() {
        let store = MemoryStore::new();

        let alice = store.create_user(&User::new("alice")).await.unwrap();
        assert_eq!(alice, 1);

        let id = store
            .create_task(&Task::new("T1", "do X", alice, alice), &[])
            .await
            .unwrap();
        assert_eq!(id, 1);

        let all = store.list_tasks(&TaskFilter::new()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].title, "T1");
        assert_eq!(all[0].content, "do X");
        assert_eq!(all[0].author_id, 1);
        assert_eq!(all[0].assigned_id, 1);

        assert_eq!(store.tasks_by_author(1).await.unwrap(), all);
        assert!(store.tasks_by_author(2).await.unwrap().is_empty());
    }
}
