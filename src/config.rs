use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, StudybookError};

/// Configuration settings for studybook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_studybook_directory")]
    pub studybook_directory: String,

    #[serde(default = "default_true")]
    pub display_complete_tasks: bool,

    #[serde(default = "default_true")]
    pub display_progress_overview: bool,

    /// How many frequent searches the dashboard lists
    #[serde(default = "default_dashboard_top_searches")]
    pub dashboard_top_searches: usize,
}

fn default_studybook_directory() -> String {
    "~".to_string()
}

fn default_true() -> bool {
    true
}

fn default_dashboard_top_searches() -> usize {
    6
}

impl Default for Config {
    fn default() -> Self {
        Self {
            studybook_directory: default_studybook_directory(),
            display_complete_tasks: true,
            display_progress_overview: true,
            dashboard_top_searches: default_dashboard_top_searches(),
        }
    }
}

pub(crate) fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| StudybookError::General("could not find home directory".to_string()))
}

impl Config {
    /// Get the config file path (~/.studybook.json)
    fn config_file_path() -> Result<PathBuf> {
        Ok(home_dir()?.join(".studybook.json"))
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file() -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            let data = serde_json::to_string_pretty(&Config::default())?;
            fs::write(&config_path, data)?;
            tracing::debug!(path = %config_path.display(), "wrote default config");
        }
        Ok(config_path)
    }

    /// Load configuration from file, merging with defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::ensure_config_file()?;
        let content = fs::read_to_string(&config_path)?;
        Self::from_json(&content)
    }

    fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("failed to load config: {err}, using defaults");
                Self::default()
            }
        }
    }
}
