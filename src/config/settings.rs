//! Client settings.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{config_path, ConfigError, Result};
use crate::api::parse::DEFAULT_SPRINT_FIELD;

/// Largest page JIRA will return for a search.
const MAX_PAGE_SIZE: u32 = 100;

/// Settings for the API client.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Per-read timeout in seconds.
    pub read_timeout_secs: u64,
    /// Time allowed for sending the request, in seconds.
    pub write_timeout_secs: u64,
    /// `maxResults` sent with every JQL search.
    pub max_results: u32,
    /// The custom field holding an issue's sprints.
    pub sprint_field: String,
    /// Overrides the `https://{domain}` URL derived from the credential.
    ///
    /// Used for self-hosted instances behind plain HTTP.
    pub base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            read_timeout_secs: 60,
            write_timeout_secs: 30,
            max_results: 50,
            sprint_field: DEFAULT_SPRINT_FIELD.to_string(),
            base_url: None,
        }
    }
}

impl Settings {
    /// Load settings from the default config file.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load and validate settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if a timeout is zero, the page
    /// size is outside 1..=100 or the sprint field is empty.
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0
            || self.read_timeout_secs == 0
            || self.write_timeout_secs == 0
        {
            return Err(ConfigError::ValidationError(
                "timeouts must be at least one second".to_string(),
            ));
        }

        if self.max_results == 0 || self.max_results > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "max_results must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.max_results
            )));
        }

        if self.sprint_field.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "sprint_field cannot be empty".to_string(),
            ));
        }

        if let Some(url) = &self.base_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::ValidationError(format!(
                    "base_url '{}' must start with http:// or https://",
                    url
                )));
            }
        }

        Ok(())
    }

    /// TCP/TLS connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Per-read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Overall deadline for one round trip: connect, write and read combined.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs + self.write_timeout_secs + self.read_timeout_secs,
        )
    }
}
