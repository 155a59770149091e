use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "reskit.config.json";

/// Client configuration: staleness windows, search gating, timeout knob
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Freshness window for list/detail entries, in seconds
    #[serde(default = "default_list_stale_secs")]
    pub list_stale_secs: u64,

    /// Freshness window for search entries, in seconds
    #[serde(default = "default_search_stale_secs")]
    pub search_stale_secs: u64,

    /// Minimum search-term length before a search fetch is attempted
    #[serde(default = "default_min_search_length")]
    pub min_search_length: usize,

    /// Optional per-call timeout, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_list_stale_secs() -> u64 {
    300
}

fn default_search_stale_secs() -> u64 {
    120
}

fn default_min_search_length() -> usize {
    2
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            list_stale_secs: default_list_stale_secs(),
            search_stale_secs: default_search_stale_secs(),
            min_search_length: default_min_search_length(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Load config from a directory, falling back to defaults when no
    /// config file exists
    pub fn load(cwd: &str) -> reskit_common::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(ClientConfig::default())
        }
    }

    /// Parse a config document
    pub fn from_json(content: &str) -> reskit_common::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn list_stale(&self) -> Duration {
        Duration::from_secs(self.list_stale_secs)
    }

    pub fn search_stale(&self) -> Duration {
        Duration::from_secs(self.search_stale_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
