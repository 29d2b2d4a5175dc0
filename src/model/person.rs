//! People referenced by issues (assignee, reporter, comment author).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A JIRA account as seen on an issue.
///
/// Identity is the account ID; two people with the same account ID are equal
/// even if their display names differ.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// The user's display name.
    pub display_name: String,
    /// The user's account ID.
    pub account_id: String,
}

impl Person {
    /// Create a new person.
    pub fn new(display_name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            account_id: account_id.into(),
        }
    }

    /// Initials for avatar badges.
    ///
    /// Takes the first letter of up to the first two whitespace-separated words,
    /// uppercased. Returns `"??"` when the display name is blank.
    pub fn initials(&self) -> String {
        let name = self.display_name.trim();
        if name.is_empty() {
            return "??".to_string();
        }

        name.split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.account_id == other.account_id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.account_id.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
