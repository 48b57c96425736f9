use serde::{Deserialize, Serialize};

/// A support interaction under evaluation. Owned by the external item
/// repository; this engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Repository-assigned identifier.
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// The concatenated text fields the evaluators read.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}
