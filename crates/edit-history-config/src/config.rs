/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "EDIT_HISTORY_CONFIG";

/// File name used when no override is given.
const CONFIG_FILE_NAME: &str = "edit-history.json";

/// Upper bound for the merge window. Anything longer would turn a whole
/// editing session into a single undo step.
const MAX_MERGE_WINDOW_MS: u64 = 60_000;

/// A history needs the seed level plus at least one recorded level.
const MIN_MAX_LEVELS: usize = 2;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Edits closer together than this (in milliseconds) coalesce into one level.
    pub merge_window_ms: u64,
    /// Maximum number of levels kept per editing session, seed included.
    pub max_levels: usize,
    /// Default `tracing` filter directive when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            merge_window_ms: 1_000,
            max_levels: 10_000,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `EDIT_HISTORY_CONFIG` environment variable
    /// 2. `edit-history.json` next to the executable
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Keep the broken file as-is so the user can fix it
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.merge_window_ms = self.merge_window_ms.min(MAX_MERGE_WINDOW_MS);
        self.max_levels = self.max_levels.max(MIN_MAX_LEVELS);
        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.merge_window_ms, 1_000);
        assert_eq!(config.max_levels, 10_000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_sanitize_clamps_merge_window() {
        let mut config = AppConfig::default();
        config.merge_window_ms = 120_000;
        config.sanitize();
        assert_eq!(config.merge_window_ms, 60_000);
    }

    #[test]
    fn test_sanitize_allows_zero_merge_window() {
        let mut config = AppConfig::default();
        config.merge_window_ms = 0;
        config.sanitize();
        assert_eq!(config.merge_window_ms, 0);
    }

    #[test]
    fn test_sanitize_raises_max_levels() {
        let mut config = AppConfig::default();
        config.max_levels = 0;
        config.sanitize();
        assert_eq!(config.max_levels, 2);

        config.max_levels = 1;
        config.sanitize();
        assert_eq!(config.max_levels, 2);
    }

    #[test]
    fn test_sanitize_resets_blank_log_filter() {
        let mut config = AppConfig::default();
        config.log_filter = "   ".to_string();
        config.sanitize();
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_sanitize_keeps_valid_values() {
        let mut config = AppConfig {
            merge_window_ms: 250,
            max_levels: 50,
            log_filter: "edit_history_engine=debug".to_string(),
        };
        let before = config.clone();
        config.sanitize();
        assert_eq!(config, before);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AppConfig {
            merge_window_ms: 300,
            max_levels: 42,
            log_filter: "debug".to_string(),
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"merge_window_ms": 750}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.merge_window_ms, 750);
        assert_eq!(parsed.max_levels, 10_000);
        assert_eq!(parsed.log_filter, "info");
    }
}
