//! Label entity definition.

use serde::{Deserialize, Serialize};

/// A label that can be attached to tasks. Append-only: once created, labels
/// are neither updated nor deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier, assigned by the store on creation. 0 until then.
    pub id: i64,
    /// Human-readable name. Not required to be unique.
    pub name: String,
}

impl Label {
    /// Creates a label. The store assigns the id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}
