//! User entity definition.

use serde::{Deserialize, Serialize};

/// A user, referenced by tasks as author or assignee by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store on creation. 0 until then.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl User {
    /// Creates a user. The store assigns the id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("alice");

        assert_eq!(user.id, 0);
        assert_eq!(user.name, "alice");
    }
}
