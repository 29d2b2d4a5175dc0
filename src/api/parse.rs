//! JSON to domain model mapping.
//!
//! Both single-issue fetches and JQL searches go through [`parse_issue`], so
//! an issue looks the same no matter how it was retrieved.
//!
//! Every field read is defensive: a null, absent or wrongly-typed field yields
//! the empty value for its type instead of failing the whole issue. Only a
//! body that is not JSON, or that lacks the top-level shape, is an error.

use serde_json::Value;

use super::adf;
use super::error::{ApiError, Result};
use crate::model::{
    Comment, Component, Issue, IssueType, Person, Priority, Project, SearchResult, Sprint,
    Status, Subtask, Version,
};

/// Custom field JIRA Cloud uses for sprints.
pub const DEFAULT_SPRINT_FIELD: &str = "customfield_10020";

/// Parse a raw response body into a JSON value.
pub fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(format!("response is not valid JSON: {}", e)))
}

/// Map a search response (`{startAt, maxResults, total, issues}`).
pub fn parse_search_result(json: &Value, sprint_field: &str) -> Result<SearchResult> {
    if !json.is_object() {
        return Err(ApiError::Parse(
            "search response is not a JSON object".to_string(),
        ));
    }

    let issues = array(json, "issues")
        .map(|node| parse_issue(node, sprint_field))
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchResult {
        issues,
        total: number(json, "total"),
        start_at: number(json, "startAt"),
        max_results: number(json, "maxResults"),
    })
}

/// Map a single issue (`{key, fields: {...}}`).
pub fn parse_issue(json: &Value, sprint_field: &str) -> Result<Issue> {
    let key = json
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Parse("issue has no key".to_string()))?;

    let fields = json.get("fields").unwrap_or(&Value::Null);

    Ok(Issue {
        key: key.to_string(),
        summary: text(fields, "summary"),
        description: adf::rich_text(fields.get("description")),
        status: parse_status(fields.get("status")),
        priority: Priority::new(text_or(
            field(fields, "priority"),
            "name",
            crate::model::DEFAULT_PRIORITY_NAME,
        )),
        issue_type: IssueType::new(text(field(fields, "issuetype"), "name")),
        project: Project::new(
            text(field(fields, "project"), "key"),
            text(field(fields, "project"), "name"),
        ),
        // JIRA always sends a reporter; no presence check beyond defaults
        reporter: person(field(fields, "reporter")),
        assignee: fields
            .get("assignee")
            .filter(|a| a.is_object())
            .map(person),
        created: text(fields, "created"),
        updated: text(fields, "updated"),
        components: array(fields, "components")
            .map(|c| Component {
                name: text(c, "name"),
            })
            .collect(),
        fix_versions: array(fields, "fixVersions")
            .map(|v| Version {
                name: text(v, "name"),
            })
            .collect(),
        sprints: array(fields, sprint_field)
            .map(|s| Sprint {
                name: text(s, "name"),
            })
            .collect(),
        subtasks: array(fields, "subtasks").map(parse_subtask).collect(),
        comments: array(field(fields, "comment"), "comments")
            .map(parse_comment)
            .collect(),
    })
}

fn parse_status(node: Option<&Value>) -> Status {
    let node = node.unwrap_or(&Value::Null);
    Status::new(
        text(node, "name"),
        text(field(node, "statusCategory"), "key"),
    )
}

fn parse_subtask(node: &Value) -> Subtask {
    // Subtask details live one level deeper, in the subtask's own fields
    let fields = field(node, "fields");
    Subtask::new(
        text(node, "key"),
        text(fields, "summary"),
        text(field(fields, "status"), "name"),
    )
}

fn parse_comment(node: &Value) -> Comment {
    Comment {
        author: person(field(node, "author")),
        body: adf::rich_text(node.get("body")).unwrap_or_default(),
        created: text(node, "created"),
    }
}

fn person(node: &Value) -> Person {
    Person::new(text(node, "displayName"), text(node, "accountId"))
}

/// Nested object lookup; null stands in for anything missing.
fn field<'a>(node: &'a Value, key: &str) -> &'a Value {
    node.get(key).unwrap_or(&Value::Null)
}

/// Scalar field as text, empty when null or absent.
fn text(node: &Value, key: &str) -> String {
    text_or(node, key, "")
}

fn text_or(node: &Value, key: &str, default: &str) -> String {
    match node.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

fn number(node: &Value, key: &str) -> u32 {
    node.get(key)
        .and_then(Value::as_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or_default()
}

/// Array elements in server order; empty when the field is missing or not an array.
fn array<'a>(node: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    node.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
