//! TBR list entries.

use serde::{Deserialize, Serialize};

/// A saved to-be-read entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Unique within a session, derived from creation time in milliseconds
    pub id: i64,

    /// Text shown for the entry
    pub display_text: String,

    /// Whether the book has been read
    pub completed: bool,
}

impl ListItem {
    /// Create a new, not yet completed item
    pub fn new(id: i64, display_text: impl Into<String>) -> Self {
        Self {
            id,
            display_text: display_text.into(),
            completed: false,
        }
    }

    /// Copy of this item with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
