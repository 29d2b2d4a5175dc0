//! Credentials and the in-memory session store.
//!
//! A [`SessionStore`] is created once at the composition root and passed to
//! whoever needs it; nothing here is global. It lives for the process and
//! holds nothing on disk.

mod credential;
mod store;

use thiserror::Error;

pub use credential::Credential;
pub use store::{SessionStore, StoreStats, StoredCredential, User};

/// Errors raised by the session store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No user with this ID was created in the store.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No credential record with this ID exists.
    #[error("Credentials not found: {0}")]
    CredentialNotFound(String),

    /// The credential cannot be persisted as given.
    #[error("Invalid credentials: {0}")]
    InvalidCredential(String),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
