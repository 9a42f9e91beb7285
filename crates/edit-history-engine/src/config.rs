/// Configuration for the history engine.
use std::time::Duration;

use edit_history_config::AppConfig;

/// Edits closer together than this coalesce into a single undo level.
const DEFAULT_MERGE_WINDOW_MS: u64 = 1_000;

/// Maximum number of levels per session, seed included.
/// Oldest levels are evicted when this limit is exceeded.
const DEFAULT_MAX_LEVELS: usize = 10_000;

/// Configuration for the history engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Rolling window in which consecutive text edits coalesce.
    pub merge_window: Duration,
    /// Max levels kept, seed included. Values below 2 are treated as 2.
    pub max_levels: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            merge_window: Duration::from_millis(DEFAULT_MERGE_WINDOW_MS),
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }
}

impl HistoryConfig {
    /// Config with the given merge window and the default capacity.
    pub fn with_merge_window(merge_window: Duration) -> Self {
        Self {
            merge_window,
            ..Self::default()
        }
    }

    /// Capacity actually enforced by the engine.
    pub(crate) fn effective_max_levels(&self) -> usize {
        self.max_levels.max(2)
    }
}

impl From<&AppConfig> for HistoryConfig {
    fn from(app: &AppConfig) -> Self {
        Self {
            merge_window: Duration::from_millis(app.merge_window_ms),
            max_levels: app.max_levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HistoryConfig::default();
        assert_eq!(config.merge_window, Duration::from_secs(1));
        assert_eq!(config.max_levels, 10_000);
    }

    #[test]
    fn test_from_app_config() {
        let app = AppConfig {
            merge_window_ms: 250,
            max_levels: 12,
            log_filter: "info".to_string(),
        };
        let config = HistoryConfig::from(&app);
        assert_eq!(config.merge_window, Duration::from_millis(250));
        assert_eq!(config.max_levels, 12);
    }

    #[test]
    fn test_defaults_agree_with_app_config() {
        let app = AppConfig::default();
        assert_eq!(HistoryConfig::from(&app), HistoryConfig::default());
    }

    #[test]
    fn test_effective_max_levels_has_floor() {
        let config = HistoryConfig {
            max_levels: 0,
            ..HistoryConfig::default()
        };
        assert_eq!(config.effective_max_levels(), 2);
    }
}
