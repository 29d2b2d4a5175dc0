//! Normalized issue domain model.
//!
//! These types are produced by [`crate::api::parse`] from raw JIRA REST v3
//! payloads and handed to the presentation layer. They carry no wire-format
//! details and no back-reference to the client that fetched them.

mod issue;
mod person;
mod priority;
mod search;
mod subtask;

pub use issue::{Comment, Component, Issue, IssueType, Project, Sprint, Status, Version};
pub use person::Person;
pub(crate) use priority::DEFAULT_PRIORITY_NAME;
pub use priority::{Priority, PriorityLevel};
pub use search::SearchResult;
pub use subtask::Subtask;
