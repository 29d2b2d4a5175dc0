//! JIRA connection credentials.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{Result, StoreError};
use crate::api::auth::encode_credentials;

/// Suffix appended to bare site names such as `acme`.
const CLOUD_SUFFIX: &str = ".atlassian.net";

/// Host, account and API token for one JIRA site.
///
/// Immutable after construction apart from the two flags. `Debug` output
/// never includes the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    domain: String,
    email: String,
    token: String,
    active: bool,
    remember: bool,
    created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential, active and not remembered.
    pub fn new(domain: impl Into<String>, email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            email: email.into(),
            token: token.into(),
            active: true,
            remember: false,
            created_at: Utc::now(),
        }
    }

    /// Set whether the shell should offer these credentials on next start.
    pub fn with_remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    /// Set whether these credentials are in use.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub(super) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Normalize a user-typed site into a bare host.
    ///
    /// Strips any `http://`/`https://` prefix and trailing slashes, and turns a
    /// bare site name into its `.atlassian.net` host.
    pub fn normalize_domain(input: &str) -> String {
        let trimmed = input.trim();
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed)
            .trim_end_matches('/');

        if host.is_empty() || host.contains('.') {
            host.to_string()
        } else {
            format!("{}{}", host, CLOUD_SUFFIX)
        }
    }

    /// Validate this credential.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidCredential` if the domain, email or token
    /// is blank, or the email has no `@`.
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(StoreError::InvalidCredential(
                "domain cannot be empty".to_string(),
            ));
        }

        if self.email.trim().is_empty() {
            return Err(StoreError::InvalidCredential(
                "email cannot be empty".to_string(),
            ));
        }

        if !self.email.contains('@') {
            return Err(StoreError::InvalidCredential(format!(
                "'{}' does not appear to be a valid email address",
                self.email
            )));
        }

        if self.token.trim().is_empty() {
            return Err(StoreError::InvalidCredential(
                "API token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// `base64(email:token)`, the payload of the Basic authorization header.
    pub fn authorization_value(&self) -> String {
        encode_credentials(&self.email, &self.token)
    }

    /// The site root, `https://{domain}`.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    /// The bare host, e.g. `acme.atlassian.net`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether these credentials are in use.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the shell should offer these credentials on next start.
    pub fn remember(&self) -> bool {
        self.remember
    }

    /// When the credential was first created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("domain", &self.domain)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("active", &self.active)
            .field("remember", &self.remember)
            .field("created_at", &self.created_at)
            .finish()
    }
}
