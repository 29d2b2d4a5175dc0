//! The issue aggregate and its small value types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::person::Person;
use super::priority::Priority;
use super::subtask::Subtask;

/// Category key assumed when the server sends no status category.
const DEFAULT_CATEGORY_KEY: &str = "new";

/// A JIRA issue, normalized for display.
///
/// Identity and equality are defined solely by [`Issue::key`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// The issue summary/title.
    pub summary: String,
    /// The description as plain text, if the issue has one.
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub issue_type: IssueType,
    pub project: Project,
    pub reporter: Person,
    /// `None` when the issue is unassigned.
    pub assignee: Option<Person>,
    /// Creation timestamp, ISO-8601 as sent by the server.
    pub created: String,
    /// Last update timestamp, ISO-8601 as sent by the server.
    pub updated: String,
    pub components: Vec<Component>,
    pub fix_versions: Vec<Version>,
    /// Sprints in server order; the first one is shown as current.
    pub sprints: Vec<Sprint>,
    pub subtasks: Vec<Subtask>,
    pub comments: Vec<Comment>,
}

impl Issue {
    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_display_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Get the reporter display name.
    pub fn reporter_display_name(&self) -> &str {
        &self.reporter.display_name
    }

    /// Get the current sprint name, or "No sprint".
    pub fn sprint_name(&self) -> &str {
        self.sprints
            .first()
            .map(|s| s.name.as_str())
            .unwrap_or("No sprint")
    }

    /// Number of comments on the issue.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Whether anyone has commented.
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    /// Number of subtasks whose status reads as finished.
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_completed()).count()
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.summary)
    }
}

/// Issue status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// The status name (e.g., "To Do", "In Progress", "Done").
    pub name: String,
    /// The raw status category key ("new", "indeterminate", "done", ...).
    ///
    /// Not validated against a fixed set; empty when the server sent none.
    pub category: String,
}

impl Status {
    /// Create a new status.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    /// Category key used for grouping and color coding.
    pub fn category_key(&self) -> &str {
        if self.category.is_empty() {
            DEFAULT_CATEGORY_KEY
        } else {
            &self.category
        }
    }

    /// Whether the status belongs to the "done" category.
    pub fn is_done(&self) -> bool {
        self.category_key().eq_ignore_ascii_case("done")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue type (Bug, Story, Task, Epic, etc.).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueType {
    /// The issue type name.
    pub name: String,
}

impl IssueType {
    /// Create a new issue type.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Icon identifier derived from the type name; "task" when nothing matches.
    pub fn icon_name(&self) -> &'static str {
        let name = self.name.to_lowercase();
        if name.contains("story") {
            "story"
        } else if name.contains("bug") {
            "bug"
        } else if name.contains("epic") {
            "epic"
        } else if name.contains("subtask") || name.contains("sub-task") {
            "subtask"
        } else if name.contains("improvement") {
            "improvement"
        } else {
            "task"
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A JIRA project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    /// The project key (e.g., "PROJ").
    pub key: String,
    /// The project name.
    pub name: String,
}

impl Project {
    /// Create a new project.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Project {}

/// A project component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Component {
    pub name: String,
}

/// A fix version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Version {
    pub name: String,
}

/// A sprint the issue belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Sprint {
    pub name: String,
}

/// A comment on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// The user who authored the comment.
    pub author: Person,
    /// The comment body as plain text.
    pub body: String,
    /// When the comment was created, ISO-8601 as sent by the server.
    pub created: String,
}
