//! JIRA API client and JSON mapping.
//!
//! This module provides the interface for communicating with the JIRA REST API
//! and for turning its payloads into [`crate::model`] values.

pub mod adf;
pub mod auth;
mod client;
pub mod error;
pub mod parse;

pub use auth::Auth;
pub use client::JiraClient;
pub use error::ApiError;
