//! Authentication handling for JIRA API.
//!
//! JIRA Cloud uses Basic Auth with the account email and an API token.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::session::Credential;

/// Authorization material for a single request.
///
/// Holds only the encoded header, so the raw token never travels further
/// than the credential it was built from.
#[derive(Clone)]
pub struct Auth {
    /// The complete "Basic ..." header value.
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from email and token.
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            auth_header: format!("Basic {}", encode_credentials(email, token)),
        }
    }

    /// Build the authorization for a stored credential.
    pub fn from_credential(credential: &Credential) -> Self {
        Self::new(credential.email(), credential.token())
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("auth_header", &"Basic <redacted>")
            .finish()
    }
}

/// Encode "email:token" in Base64, without the "Basic " scheme prefix.
pub fn encode_credentials(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    BASE64.encode(credentials.as_bytes())
}
