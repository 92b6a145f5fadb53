use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::clients::DEFAULT_BASE_URL;

pub const BASE_URL_ENV: &str = "HN_API_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which tools get registered, plus the thinking toolkit's instructions.
///
/// `all` turns on every tool regardless of the individual flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub base_url: String,
    pub enable_get_top_stories: bool,
    pub enable_get_user_details: bool,
    pub enable_think: bool,
    pub all: bool,
    pub instructions: Option<String>,
    pub add_instructions: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            enable_get_top_stories: true,
            enable_get_user_details: true,
            enable_think: true,
            all: false,
            instructions: None,
            add_instructions: false,
        }
    }
}

impl ToolkitConfig {
    pub fn top_stories_enabled(&self) -> bool {
        self.all || self.enable_get_top_stories
    }

    pub fn user_details_enabled(&self) -> bool {
        self.all || self.enable_get_user_details
    }

    pub fn think_enabled(&self) -> bool {
        self.all || self.enable_think
    }
}

/// Loads the toolkit config from a JSON file. A missing file yields the
/// defaults.
pub async fn load_config(config_path: &Path) -> Result<ToolkitConfig, ConfigError> {
    if !config_path.exists() {
        return Ok(ToolkitConfig::default());
    }

    let content = tokio::fs::read_to_string(config_path).await?;
    Ok(serde_json::from_str(&content)?)
}
