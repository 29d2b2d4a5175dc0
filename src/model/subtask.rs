//! Subtasks listed on a parent issue.

use serde::Serialize;

/// A subtask summary as embedded in the parent issue's `subtasks` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    /// The subtask key (e.g., "PROJ-124").
    pub key: String,
    /// The subtask summary.
    pub summary: String,
    /// The subtask's status name.
    pub status_name: String,
}

impl Subtask {
    /// Create a new subtask.
    pub fn new(
        key: impl Into<String>,
        summary: impl Into<String>,
        status_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            status_name: status_name.into(),
        }
    }

    /// Whether the status name reads as finished ("done", "closed", "resolved").
    pub fn is_completed(&self) -> bool {
        self.status_matches(&["done", "closed", "resolved"])
    }

    /// Whether the status name reads as active ("progress", "review").
    pub fn is_in_progress(&self) -> bool {
        self.status_matches(&["progress", "review"])
    }

    fn status_matches(&self, needles: &[&str]) -> bool {
        let status = self.status_name.to_lowercase();
        needles.iter().any(|n| status.contains(n))
    }
}
