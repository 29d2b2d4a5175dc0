//! Integration tests for `JiraClient` against a mock JIRA server.

use std::net::TcpListener;
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use jirainsight::api::{ApiError, JiraClient};
use jirainsight::config::Settings;
use jirainsight::model::PriorityLevel;
use jirainsight::session::Credential;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const EMAIL: &str = "dev@acme.io";
const TOKEN: &str = "api-token";

fn client_for(server: &MockServer) -> JiraClient {
    let settings = Settings {
        base_url: Some(server.uri()),
        ..Default::default()
    };
    JiraClient::new(&settings).unwrap()
}

fn credential() -> Credential {
    Credential::new("acme.atlassian.net", EMAIL, TOKEN)
}

fn basic_auth() -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", EMAIL, TOKEN)))
}

fn issue_json(key: &str, summary: &str) -> serde_json::Value {
    json!({
        "key": key,
        "fields": {
            "summary": summary,
            "status": {"name": "To Do", "statusCategory": {"key": "new"}},
            "priority": {"name": "High"},
            "issuetype": {"name": "Bug"},
            "project": {"key": "PROJ", "name": "Project"},
            "reporter": {"accountId": "r1", "displayName": "Rita Reporter"},
            "assignee": null,
            "created": "2024-03-01T08:00:00.000+0000",
            "updated": "2024-03-02T08:00:00.000+0000"
        }
    })
}

#[tokio::test]
async fn test_connection_succeeds_with_valid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/myself"))
        .and(header("authorization", basic_auth().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountId": "me"})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).test_connection(&credential()).await);
}

#[tokio::test]
async fn test_connection_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/myself"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client_for(&server).test_connection(&credential()).await);
}

#[tokio::test]
async fn test_fetch_issue_sends_headers_and_expand() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-123"))
        .and(query_param("expand", "subtasks,comments"))
        .and(header("authorization", basic_auth().as_str()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_json("PROJ-123", "Broken login")))
        .expect(1)
        .mount(&server)
        .await;

    let issue = client_for(&server)
        .fetch_issue("PROJ-123", &credential())
        .await
        .unwrap();

    assert_eq!(issue.key, "PROJ-123");
    assert_eq!(issue.summary, "Broken login");
    assert_eq!(issue.status.category_key(), "new");
    assert_eq!(issue.priority.level(), PriorityLevel::High);
    assert_eq!(issue.issue_type.icon_name(), "bug");
    assert!(issue.assignee.is_none());
    assert_eq!(issue.assignee_display_name(), "Unassigned");
    assert_eq!(issue.reporter_display_name(), "Rita Reporter");
}

#[tokio::test]
async fn test_fetch_issue_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorMessages": ["Issue does not exist or you do not have permission to see it."],
            "errors": {}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_issue("PROJ-404", &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Remote { status: Some(404), .. }));
    assert!(err.message().contains("Issue does not exist"));
}

#[tokio::test]
async fn test_fetch_issue_invalid_json_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_issue("PROJ-1", &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_search_posts_jql_and_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "jql": "project = PROJ ORDER BY created DESC",
            "maxResults": 50,
            "fields": [
                "summary", "status", "assignee", "reporter", "priority", "issuetype",
                "project", "created", "updated", "components", "fixVersions",
                "customfield_10020", "subtasks", "comment"
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 120,
            "issues": [issue_json("PROJ-2", "Second"), issue_json("PROJ-1", "First")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search_issues("project = PROJ ORDER BY created DESC", &credential())
        .await
        .unwrap();

    assert_eq!(result.total, 120);
    assert_eq!(result.issue_count(), 2);
    assert_eq!(result.issues[0].key, "PROJ-2");
    assert_eq!(result.issues[1].key, "PROJ-1");
    assert!(result.has_more());
    assert_eq!(result.summary(), "Showing 2 of 120 issues");
}

#[tokio::test]
async fn test_search_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0, "maxResults": 50, "total": 0, "issues": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search_issues("project = EMPTY", &credential())
        .await
        .unwrap();

    assert!(result.is_empty());
    assert!(!result.has_more());
    assert_eq!(result.summary(), "No issues found");
}

#[tokio::test]
async fn test_search_invalid_jql_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": ["Error in the JQL Query: Expecting operator but got 'PROJ'."],
            "errors": {}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_issues("project PROJ", &credential())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert!(err.message().contains("Error in the JQL Query"));
}

#[tokio::test]
async fn test_slow_server_times_out_with_connection_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(issue_json("PROJ-1", "Slow"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let settings = Settings {
        base_url: Some(server.uri()),
        read_timeout_secs: 1,
        ..Default::default()
    };
    let client = JiraClient::new(&settings).unwrap();

    let started = Instant::now();
    let err = client
        .fetch_issue("PROJ-1", &credential())
        .await
        .unwrap_err();

    assert!(err.is_connection_failure());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let settings = Settings {
        base_url: Some(format!("http://127.0.0.1:{}", port)),
        ..Default::default()
    };
    let client = JiraClient::new(&settings).unwrap();

    let err = client
        .search_issues("project = PROJ", &credential())
        .await
        .unwrap_err();
    assert!(err.is_connection_failure());
    assert!(!client.test_connection(&credential()).await);
}
