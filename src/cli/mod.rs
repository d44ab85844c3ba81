//! CLI command implementations

pub mod init;
pub mod record;
pub mod status;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use studyquest::config::Config;
use studyquest::store::SqliteStore;
use studyquest::{GamificationEvent, ProgressTracker};

/// Resolved configuration shared by all commands
pub struct CliContext {
    pub config: Config,
    pub db_path: PathBuf,
}

impl CliContext {
    pub fn load(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let db_path = db_override.unwrap_or_else(|| config.database_path());
        Ok(Self { config, db_path })
    }

    /// Open the progress database and load the tracker from it
    pub fn open_tracker(&self) -> Result<ProgressTracker> {
        let store = SqliteStore::open(&self.db_path).with_context(|| {
            format!("Failed to open progress database: {}", self.db_path.display())
        })?;

        Ok(ProgressTracker::load_with(
            Box::new(store),
            self.config.settings.tracker_settings(),
            studyquest::today(),
        ))
    }
}

/// Print gamification events, one per line
pub fn print_events(events: &[GamificationEvent]) {
    if events.is_empty() {
        println!("No new progress.");
        return;
    }

    for event in events {
        println!("  {}", event);
    }
}
