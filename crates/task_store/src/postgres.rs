//! PostgreSQL storage backend.
//!
//! Every port operation maps to one parameterized statement (or one
//! transaction, for task creation) against an externally managed schema;
//! `schema.sql` at the repository root documents the expected shape. The
//! backend never creates or migrates tables.

use async_trait::async_trait;
use entities::{Label, Task, User};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};

use crate::{StoreError, StoreResult, TaskFilter, TaskStore};

/// Database row for a task.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    opened: i64,
    closed: i64,
    author_id: i64,
    assigned_id: i64,
    title: String,
    content: String,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            opened: row.opened,
            closed: row.closed,
            author_id: row.author_id,
            assigned_id: row.assigned_id,
            title: row.title,
            content: row.content,
        }
    }
}

/// Database row for a label.
#[derive(Debug, FromRow)]
struct LabelRow {
    id: i64,
    name: String,
}

impl From<LabelRow> for Label {
    fn from(row: LabelRow) -> Self {
        Label {
            id: row.id,
            name: row.name,
        }
    }
}

/// Database row for a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
        }
    }
}

/// Task store backed by a PostgreSQL connection pool.
///
/// The pool is built once at startup, shared by all operations for the
/// process lifetime, and released exactly once through `close`.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to the database at `url` and builds the shared pool.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(StoreError::Connection)?;

        info!("connected to PostgreSQL");
        Ok(Self { pool })
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, opened, closed, author_id, assigned_id, title, content
             FROM tasks
             WHERE ($1::BIGINT IS NULL OR id = $1)
               AND ($2::BIGINT IS NULL OR author_id = $2)
             ORDER BY id",
        )
        .bind(filter.id)
        .bind(filter.author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::query("list_tasks"))?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn create_task(&self, task: &Task, label_ids: &[i64]) -> StoreResult<i64> {
        // Task row and association rows commit or roll back together.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::query("create_task"))?;

        let (task_id,): (i64,) = sqlx::query_as(
            "INSERT INTO tasks (opened, closed, author_id, assigned_id, title, content)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(task.opened)
        .bind(task.closed)
        .bind(task.author_id)
        .bind(task.assigned_id)
        .bind(&task.title)
        .bind(&task.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::query("create_task"))?;

        for &label_id in label_ids {
            sqlx::query("INSERT INTO tasks_labels (task_id, label_id) VALUES ($1, $2)")
                .bind(task_id)
                .bind(label_id)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::query("create_task"))?;
        }

        tx.commit()
            .await
            .map_err(StoreError::query("create_task"))?;

        debug!(task_id, labels = label_ids.len(), "task created");
        Ok(task_id)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        // Zero affected rows is a success, not a not-found error.
        sqlx::query(
            "UPDATE tasks
             SET title = $1, content = $2, author_id = $3, assigned_id = $4
             WHERE id = $5",
        )
        .bind(&task.title)
        .bind(&task.content)
        .bind(task.author_id)
        .bind(task.assigned_id)
        .bind(task.id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::query("update_task"))?;

        Ok(())
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::query("delete_task"))?;

        Ok(())
    }

    async fn list_labels(&self) -> StoreResult<Vec<Label>> {
        let rows: Vec<LabelRow> = sqlx::query_as("SELECT id, name FROM labels ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::query("list_labels"))?;

        Ok(rows.into_iter().map(Label::from).collect())
    }

    async fn create_label(&self, label: &Label) -> StoreResult<i64> {
        let (id,): (i64,) = sqlx::query_as("INSERT INTO labels (name) VALUES ($1) RETURNING id")
            .bind(&label.name)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query("create_label"))?;

        Ok(id)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::query("list_users"))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn create_user(&self, user: &User) -> StoreResult<i64> {
        let (id,): (i64,) = sqlx::query_as("INSERT INTO users (name) VALUES ($1) RETURNING id")
            .bind(&user.name)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query("create_user"))?;

        Ok(id)
    }

    async fn tasks_by_author(&self, author_id: i64) -> StoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, opened, closed, author_id, assigned_id, title, content
             FROM tasks
             WHERE author_id = $1
             ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::query("tasks_by_author"))?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn close(&self) {
        debug!("closing PostgreSQL pool");
        self.pool.close().await;
    }
}
