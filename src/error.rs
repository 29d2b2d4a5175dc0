//! Centralized error types for JiraInsight.
//!
//! Module errors stay typed where they are raised; [`AppError`] gathers them
//! at the edge so a host can show one message and one suggested action.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::session::StoreError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Session store errors.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::ConnectionFailed(_) => {
                    "Could not connect to JIRA. Please check the domain and your network."
                        .to_string()
                }
                ApiError::Remote {
                    status: Some(401), ..
                } => "Authentication failed. Please check your email and API token.".to_string(),
                ApiError::Remote {
                    status: Some(403), ..
                } => "Access denied. You don't have permission to access this resource."
                    .to_string(),
                ApiError::Remote {
                    status: Some(404), ..
                } => "The requested issue was not found.".to_string(),
                ApiError::Remote { message, .. } => format!("JIRA error: {}", message),
                ApiError::Parse(_) => {
                    "Unexpected response from JIRA. Please try again.".to_string()
                }
            },
            AppError::Store(e) => match e {
                StoreError::UserNotFound(_) => "Unknown user. Please sign in again.".to_string(),
                StoreError::CredentialNotFound(_) => {
                    "No saved credentials. Please enter your JIRA credentials.".to_string()
                }
                StoreError::InvalidCredential(msg) => format!("Invalid credentials: {}", msg),
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove config.toml to fall back to the defaults.")
            }
            AppError::Api(e) if e.is_unauthorized() => {
                Some("Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens")
            }
            AppError::Api(ApiError::ConnectionFailed(_)) => {
                Some("Check your internet connection and JIRA domain.")
            }
            AppError::Api(ApiError::Remote {
                status: Some(400), ..
            }) => Some("Check the JQL syntax and try again."),
            AppError::Store(StoreError::CredentialNotFound(_))
            | AppError::Store(StoreError::InvalidCredential(_)) => {
                Some("Enter your JIRA domain, email and API token.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
