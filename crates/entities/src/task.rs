//! Task entity definition.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A tracked task.
///
/// Labels are not a field here; they are attached at creation time through
/// the storage port and live in the task–label association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store on creation. 0 until then.
    pub id: i64,
    /// Epoch second the task was opened. 0 when unset.
    pub opened: i64,
    /// Epoch second the task was closed. 0 while still open.
    pub closed: i64,
    /// Id of the authoring user.
    pub author_id: i64,
    /// Id of the assigned user.
    pub assigned_id: i64,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub content: String,
}

impl Task {
    /// Creates a task opened now. The store assigns the id.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        assigned_id: i64,
    ) -> Self {
        Self {
            id: 0,
            opened: Utc::now().timestamp(),
            closed: 0,
            author_id,
            assigned_id,
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Fix the build", "cargo check fails on CI", 1, 2);

        assert_eq!(task.id, 0);
        assert_eq!(task.title, "Fix the build");
        assert_eq!(task.content, "cargo check fails on CI");
        assert_eq!(task.author_id, 1);
        assert_eq!(task.assigned_id, 2);
        assert!(task.opened > 0);
        assert_eq!(task.closed, 0);
    }
}
