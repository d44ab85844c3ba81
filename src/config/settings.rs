//! Settings configuration types

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::progress::{
    TrackerSettings, DEFAULT_EARLY_SESSION_CUTOFF_HOUR, DEFAULT_MINUTES_PER_TASK,
};

/// Longest allowed gap between day-boundary checks
pub const MAX_TICK_INTERVAL_SECS: u64 = 60;

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the progress database (defaults to ~/.studyquest/)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// File name of the progress database inside `data_dir`
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Seconds between day-boundary checks (clamped to 1..=60)
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// Focus minutes credited per completed task
    #[serde(default = "default_minutes_per_task")]
    pub minutes_per_task: u32,

    /// Focus sessions starting before this local hour count as early sessions
    #[serde(default = "default_early_session_cutoff_hour")]
    pub early_session_cutoff_hour: u32,
}

fn default_database_file() -> String {
    "progress.db".to_string()
}

fn default_tick_interval_secs() -> u64 {
    MAX_TICK_INTERVAL_SECS
}

fn default_minutes_per_task() -> u32 {
    DEFAULT_MINUTES_PER_TASK
}

fn default_early_session_cutoff_hour() -> u32 {
    DEFAULT_EARLY_SESSION_CUTOFF_HOUR
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: default_database_file(),
            tick_interval_secs: default_tick_interval_secs(),
            minutes_per_task: default_minutes_per_task(),
            early_session_cutoff_hour: default_early_session_cutoff_hour(),
        }
    }
}

impl Settings {
    /// Day-boundary check interval, never longer than a minute
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.clamp(1, MAX_TICK_INTERVAL_SECS))
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            minutes_per_task: self.minutes_per_task,
            early_session_cutoff_hour: self.early_session_cutoff_hour.min(24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_is_clamped() {
        let mut settings = Settings::default();
        assert_eq!(settings.tick_interval(), Duration::from_secs(60));

        settings.tick_interval_secs = 600;
        assert_eq!(settings.tick_interval(), Duration::from_secs(60));

        settings.tick_interval_secs = 0;
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_tracker_settings() {
        let settings = Settings {
            minutes_per_task: 25,
            ..Settings::default()
        };
        let tracker = settings.tracker_settings();
        assert_eq!(tracker.minutes_per_task, 25);
        assert_eq!(tracker.early_session_cutoff_hour, 8);
    }
}
