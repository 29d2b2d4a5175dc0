//! Async task dispatch for API operations.
//!
//! Callers that must not block (a UI loop, for instance) hand operations to a
//! [`TaskSpawner`]. Each operation runs on its own tokio task, performs exactly
//! one client call and sends an [`ApiMessage`] back through a channel. The
//! caller polls the receiver and re-dispatches results to its own context.
//!
//! There is no cancellation: dropping the receiver discards results, while
//! requests already in flight run until they complete or time out.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{ApiError, JiraClient};
use crate::model::{Issue, SearchResult};
use crate::session::Credential;

/// Messages sent from background tasks to the caller.
#[derive(Debug)]
pub enum ApiMessage {
    /// Connection test finished; `ok` is false for any failure.
    ConnectionTested { domain: String, ok: bool },

    /// Single issue fetch finished.
    IssueFetched {
        key: String,
        result: Result<Issue, ApiError>,
    },

    /// JQL search finished.
    SearchCompleted {
        jql: String,
        result: Result<SearchResult, ApiError>,
    },
}

/// Spawns background tasks for API operations.
///
/// Each method clones what it needs and spawns a tokio task that sends its
/// result through the channel. Must be called from within a tokio runtime.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a connection test.
    pub fn spawn_test_connection(
        &self,
        client: &JiraClient,
        credential: Credential,
    ) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let ok = client.test_connection(&credential).await;
            let domain = credential.domain().to_string();
            send(&tx, ApiMessage::ConnectionTested { domain, ok });
        })
    }

    /// Spawn a fetch of one issue by key.
    pub fn spawn_fetch_issue(
        &self,
        client: &JiraClient,
        key: String,
        credential: Credential,
    ) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.fetch_issue(&key, &credential).await;
            send(&tx, ApiMessage::IssueFetched { key, result });
        })
    }

    /// Spawn a JQL search.
    pub fn spawn_search(
        &self,
        client: &JiraClient,
        jql: String,
        credential: Credential,
    ) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.search_issues(&jql, &credential).await;
            send(&tx, ApiMessage::SearchCompleted { jql, result });
        })
    }
}

fn send(tx: &mpsc::UnboundedSender<ApiMessage>, message: ApiMessage) {
    if tx.send(message).is_err() {
        debug!("Result discarded, receiver dropped");
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled by
/// the caller, and the spawner used to start operations.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
