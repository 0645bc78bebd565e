//! Configuration handling for the builder

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Base URL used for share links when none is configured
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080";

/// User configuration for the builder
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormflowConfig {
    /// Show the live preview next to the editor
    pub show_preview: Option<bool>,
    /// Prefix for generated share links
    pub share_base_url: Option<String>,
    /// Template id to start new sessions from
    pub default_template: Option<String>,
}

impl FormflowConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "formflow", "formflow-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: FormflowConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview.unwrap_or(true)
    }

    pub fn share_base_url(&self) -> &str {
        self.share_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SHARE_BASE_URL)
            .trim_end_matches('/')
    }
}
