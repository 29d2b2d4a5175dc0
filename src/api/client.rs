//! JIRA API client implementation.
//!
//! Each operation is one authenticated round trip against REST API v3. The
//! client keeps no per-call state, so clones can run operations concurrently
//! without locking. Failures are returned, never retried.

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::parse;
use crate::config::Settings;
use crate::model::{Issue, SearchResult};
use crate::session::Credential;

/// Fields requested by every JQL search, in order. The sprint custom field is
/// inserted after `fixVersions`.
const SEARCH_FIELDS_HEAD: [&str; 11] = [
    "summary",
    "status",
    "assignee",
    "reporter",
    "priority",
    "issuetype",
    "project",
    "created",
    "updated",
    "components",
    "fixVersions",
];
const SEARCH_FIELDS_TAIL: [&str; 2] = ["subtasks", "comment"];

/// Body of `POST /rest/api/3/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    jql: &'a str,
    max_results: u32,
    fields: Vec<&'a str>,
}

/// The JIRA API client.
///
/// Credentials are supplied per call, so one client serves any number of
/// sites and users.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// Replaces `https://{domain}` when set.
    base_url_override: Option<String>,
    /// `maxResults` for searches.
    max_results: u32,
    /// The custom field holding sprints.
    sprint_field: String,
}

impl JiraClient {
    /// Create a new JIRA client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. no TLS backend).
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout())
            .read_timeout(settings.read_timeout())
            .timeout(settings.request_timeout())
            .build()
            .map_err(ApiError::ConnectionFailed)?;

        Ok(Self {
            client,
            base_url_override: settings.base_url.as_deref().map(normalize_base_url),
            max_results: settings.max_results,
            sprint_field: settings.sprint_field.clone(),
        })
    }

    /// Check that the credentials are accepted by calling `GET /rest/api/3/myself`.
    ///
    /// Returns `true` only for a success status. Transport failures and error
    /// statuses are logged and reported as `false`.
    #[instrument(skip(self, credential), fields(domain = %credential.domain()))]
    pub async fn test_connection(&self, credential: &Credential) -> bool {
        let url = format!("{}/rest/api/3/myself", self.base_url(credential));

        match self.request(Method::GET, &url, credential).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Connection test succeeded");
                true
            }
            Ok(response) => {
                warn!(
                    status = response.status().as_u16(),
                    "Connection test rejected by server"
                );
                false
            }
            Err(e) => {
                error!("Connection test failed: {}", e);
                false
            }
        }
    }

    /// Get a single issue by key, with subtasks and comments expanded.
    ///
    /// # Errors
    ///
    /// `ApiError::Remote` for a non-success status, `ApiError::ConnectionFailed`
    /// if the server is unreachable, `ApiError::Parse` for an unusable body.
    #[instrument(skip(self, credential), fields(issue_key = %key, domain = %credential.domain()))]
    pub async fn fetch_issue(&self, key: &str, credential: &Credential) -> Result<Issue> {
        debug!("Fetching issue");

        let url = format!(
            "{}/rest/api/3/issue/{}?expand=subtasks,comments",
            self.base_url(credential),
            urlencoding::encode(key)
        );

        let result = self
            .execute(self.request(Method::GET, &url, credential))
            .await
            .and_then(|json| parse::parse_issue(&json, &self.sprint_field));

        match result {
            Ok(issue) => {
                info!("Fetched issue {}", issue.key);
                Ok(issue)
            }
            Err(e) => {
                error!("Failed to fetch issue: {}", e);
                Err(e)
            }
        }
    }

    /// Search for issues using JQL.
    ///
    /// Requests the first page of `max_results` issues with a fixed field
    /// list. JQL is passed through untouched; syntax errors come back as
    /// `ApiError::Remote` carrying the server's message.
    #[instrument(skip(self, credential), fields(jql = %jql, domain = %credential.domain()))]
    pub async fn search_issues(&self, jql: &str, credential: &Credential) -> Result<SearchResult> {
        debug!(max_results = self.max_results, "Searching issues");

        let url = format!("{}/rest/api/3/search", self.base_url(credential));
        let body = SearchRequest {
            jql,
            max_results: self.max_results,
            fields: self.search_fields(),
        };

        let request = self
            .request(Method::POST, &url, credential)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body);

        let result = self
            .execute(request)
            .await
            .and_then(|json| parse::parse_search_result(&json, &self.sprint_field));

        match result {
            Ok(result) => {
                info!(
                    "Search completed: {} issues returned (total: {})",
                    result.issue_count(),
                    result.total
                );
                Ok(result)
            }
            Err(e) => {
                error!("Search failed: {}", e);
                Err(e)
            }
        }
    }

    /// The field list sent with every search.
    pub fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = SEARCH_FIELDS_HEAD.to_vec();
        fields.push(&self.sprint_field);
        fields.extend(SEARCH_FIELDS_TAIL);
        fields
    }

    /// The site root requests for this credential go to.
    pub fn base_url(&self, credential: &Credential) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| credential.base_url())
    }

    /// Start a request with authentication and content negotiation headers.
    fn request(&self, method: Method, url: &str, credential: &Credential) -> RequestBuilder {
        let auth = Auth::from_credential(credential);
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, auth.header_value())
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request and return the JSON body of a successful response.
    async fn execute(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response(response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            parse::parse_body(&body)
        } else {
            debug!("Error response body: {}", body);
            Err(error_from_response(status, &body))
        }
    }
}

/// Create an error from a non-success response, preferring JIRA's own messages.
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| jira_error_message(&json))
        .unwrap_or_default();

    ApiError::from_status(status, &message)
}

/// Extract `errorMessages` or the `errors` map from a JIRA error body.
fn jira_error_message(json: &Value) -> Option<String> {
    let messages: Vec<&str> = json
        .get("errorMessages")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if !messages.is_empty() {
        return Some(messages.join(", "));
    }

    let errors: Vec<String> = json
        .get("errors")
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| match v.as_str() {
                    Some(s) => format!("{}: {}", k, s),
                    None => format!("{}: {}", k, v),
                })
                .collect()
        })
        .unwrap_or_default();
    if !errors.is_empty() {
        return Some(errors.join(", "));
    }

    None
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
