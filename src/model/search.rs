//! JQL search results.

use serde::Serialize;

use super::issue::Issue;

/// One page of issues returned by a JQL search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The issues on this page, in server order.
    pub issues: Vec<Issue>,
    /// Total number of matching issues.
    pub total: u32,
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
}

impl SearchResult {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.next_start() < self.total
    }

    /// Get the starting index for the next page.
    ///
    /// Saturates at `u32::MAX` instead of overflowing.
    pub fn next_start(&self) -> u32 {
        let count = u32::try_from(self.issue_count()).unwrap_or(u32::MAX);
        self.start_at.saturating_add(count)
    }

    /// Number of issues on this page.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Whether this page holds no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable description of what was found.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No issues found".to_string()
        } else if self.total as usize == self.issue_count() {
            format!(
                "{} issue{} found",
                self.total,
                if self.total == 1 { "" } else { "s" }
            )
        } else {
            format!("Showing {} of {} issues", self.issue_count(), self.total)
        }
    }
}
