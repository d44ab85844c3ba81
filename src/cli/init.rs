//! Init command implementation

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use studyquest::config::{write_locked, Config};

/// Default configuration content for studyquest init
pub const DEFAULT_CONFIG: &str = r#"# StudyQuest Configuration
# ========================
#
# Progress (XP, stats, achievements, daily challenges) is stored in a SQLite
# database inside data_dir.

[settings]
# Directory for progress.db (defaults to ~/.studyquest)
# data_dir = "/home/me/.studyquest"
database_file = "progress.db"

# Seconds between checks for a new calendar day (1-60)
tick_interval_secs = 60

# Focus minutes credited for every completed task
minutes_per_task = 30

# Focus sessions starting before this hour (local time) count as early sessions
early_session_cutoff_hour = 8
"#;

/// Write the default config file
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    write_locked(&path, DEFAULT_CONFIG)?;

    info!("Created config file: {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_writes_config_and_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_command(Some(&path), false).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
        assert!(!path.with_extension("toml.tmp").exists());

        std::fs::write(&path, "[settings\n").unwrap();
        assert!(init_command(Some(&path), false).is_err());

        init_command(Some(&path), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
