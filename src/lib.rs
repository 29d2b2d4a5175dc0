//! JiraInsight - a JIRA Cloud client core.
//!
//! Provides the issue domain model, a REST API v3 client that maps JSON into
//! it, an in-memory credential store and a task spawner for running requests
//! off the caller's thread.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod session;
pub mod tasks;
