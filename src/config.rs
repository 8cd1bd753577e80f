use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{PanelError, Result};

const DEFAULT_USER_AGENT: &str = "panel-files/0.1";

/// Connection settings for the panel API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Panel base URL, e.g. `https://panel.example.com`
    pub base_url: String,
    /// Client API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout applied by the HTTP transport. `None` waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl PanelConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Load a JSON config file
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let config: PanelConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `PANEL_URL`, `PANEL_API_KEY` and `PANEL_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PANEL_URL").map_err(|_| PanelError::InvalidConfig {
            message: "PANEL_URL is not set".to_string(),
        })?;

        let mut config = PanelConfig::new(base_url);
        config.api_key = std::env::var("PANEL_API_KEY").ok().filter(|k| !k.is_empty());

        if let Ok(raw) = std::env::var("PANEL_TIMEOUT_SECS") {
            let secs = raw.parse().map_err(|_| PanelError::InvalidConfig {
                message: format!("PANEL_TIMEOUT_SECS is not a number: {}", raw),
            })?;
            config.timeout_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(PanelError::InvalidConfig {
                message: "base_url must not be empty".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(PanelError::InvalidConfig {
                message: format!("base_url must be an http(s) URL: {}", self.base_url),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(PanelError::InvalidConfig {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
