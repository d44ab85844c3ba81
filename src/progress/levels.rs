//! XP and Level system
//!
//! Defines level thresholds, titles, and the experience ledger state.

use serde::{Deserialize, Serialize};

/// Level definition
#[derive(Debug, Clone)]
pub struct Level {
    pub level: u32,
    pub xp_required: u32,
    pub title: &'static str,
}

/// All level definitions (must be sorted by level)
pub static LEVELS: &[Level] = &[
    Level {
        level: 1,
        xp_required: 0,
        title: "Novice Learner",
    },
    Level {
        level: 2,
        xp_required: 100,
        title: "Curious Student",
    },
    Level {
        level: 3,
        xp_required: 250,
        title: "Dedicated Scholar",
    },
    Level {
        level: 4,
        xp_required: 500,
        title: "Knowledge Seeker",
    },
    Level {
        level: 5,
        xp_required: 1000,
        title: "Study Enthusiast",
    },
    Level {
        level: 6,
        xp_required: 2000,
        title: "Academic Achiever",
    },
    Level {
        level: 7,
        xp_required: 3500,
        title: "Learning Expert",
    },
    Level {
        level: 8,
        xp_required: 5500,
        title: "Master Scholar",
    },
    Level {
        level: 9,
        xp_required: 8000,
        title: "Wisdom Keeper",
    },
    Level {
        level: 10,
        xp_required: 12000,
        title: "Grand Scholar",
    },
];

/// Title used for any level past the end of the table
pub const TERMINAL_TITLE: &str = "Legendary Scholar";

impl Level {
    /// Calculate level and title for given XP
    pub fn for_xp(xp: u32) -> &'static Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| xp >= l.xp_required)
            .unwrap_or(&LEVELS[0])
    }

    /// Get XP needed for next level (None if max level)
    pub fn xp_for_next(current_level: u32) -> Option<u32> {
        LEVELS
            .iter()
            .find(|l| l.level == current_level + 1)
            .map(|l| l.xp_required)
    }

    /// XP at which the given level starts
    pub fn xp_floor(level: u32) -> u32 {
        LEVELS
            .iter()
            .find(|l| l.level == level)
            .map(|l| l.xp_required)
            .unwrap_or_else(Self::max_xp)
    }

    /// Title for a level, falling back to the terminal title past the table
    pub fn title_for(level: u32) -> &'static str {
        LEVELS
            .get(level.saturating_sub(1) as usize)
            .map(|l| l.title)
            .unwrap_or(TERMINAL_TITLE)
    }

    /// Get max level
    pub fn max_level() -> u32 {
        LEVELS.last().map(|l| l.level).unwrap_or(1)
    }

    /// Threshold of the final level
    pub fn max_xp() -> u32 {
        LEVELS.last().map(|l| l.xp_required).unwrap_or(0)
    }
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: String,
}

/// Durable XP/level aggregate.
///
/// `level`, `title` and `next_level_xp` are always derived from `current_xp`;
/// records loaded from storage are normalized through [`ProgressionState::from_xp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub level: u32,
    pub title: String,
    pub current_xp: u32,
    pub next_level_xp: u32,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::from_xp(0)
    }
}

impl ProgressionState {
    /// Build the aggregate for a cumulative XP value
    pub fn from_xp(current_xp: u32) -> Self {
        let level_info = Level::for_xp(current_xp);

        Self {
            level: level_info.level,
            title: Level::title_for(level_info.level).to_string(),
            current_xp,
            // The last level repeats its own threshold as the upper bound
            next_level_xp: Level::xp_for_next(level_info.level).unwrap_or_else(Level::max_xp),
        }
    }

    /// Credit XP and recompute the level.
    ///
    /// Returns a single `LevelUp` for the final level reached, even when the
    /// credit skips several levels at once.
    pub fn credit(&mut self, amount: u32) -> Option<LevelUp> {
        let old_level = self.level;
        *self = Self::from_xp(self.current_xp.saturating_add(amount));

        (self.level > old_level).then(|| LevelUp {
            old_level,
            new_level: self.level,
            new_title: self.title.clone(),
        })
    }

    /// Progress within the current level
    pub fn progress(&self) -> LevelProgress {
        let floor = Level::xp_floor(self.level);
        let current = self.current_xp.saturating_sub(floor);
        let total = self.next_level_xp.saturating_sub(floor).max(1);

        LevelProgress {
            current,
            total,
            percentage: ((current as f32 / total as f32) * 100.0).min(100.0),
        }
    }

    /// Check if at max level
    pub fn is_max_level(&self) -> bool {
        self.level >= Level::max_level()
    }
}

/// XP progress inside the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub current: u32,
    pub total: u32,
    pub percentage: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(Level::for_xp(0).level, 1);
        assert_eq!(Level::for_xp(99).level, 1);
        assert_eq!(Level::for_xp(100).level, 2);
        assert_eq!(Level::for_xp(250).level, 3);
        assert_eq!(Level::for_xp(11999).level, 9);
        assert_eq!(Level::for_xp(12000).level, 10);
        assert_eq!(Level::for_xp(50000).level, 10); // Beyond max
    }

    #[test]
    fn test_levels_are_sorted() {
        for pair in LEVELS.windows(2) {
            assert_eq!(pair[1].level, pair[0].level + 1);
            assert!(pair[1].xp_required > pair[0].xp_required);
        }
        assert_eq!(LEVELS.len(), 10);
    }

    #[test]
    fn test_title_fallback() {
        assert_eq!(Level::title_for(1), "Novice Learner");
        assert_eq!(Level::title_for(3), "Dedicated Scholar");
        assert_eq!(Level::title_for(11), TERMINAL_TITLE);
    }

    #[test]
    fn test_state_from_xp() {
        let state = ProgressionState::from_xp(150);
        assert_eq!(state.level, 2);
        assert_eq!(state.title, "Curious Student");
        assert_eq!(state.next_level_xp, 250);

        let max = ProgressionState::from_xp(20000);
        assert_eq!(max.level, 10);
        assert_eq!(max.next_level_xp, 12000);
        assert!(max.is_max_level());
    }

    #[test]
    fn test_credit_level_up() {
        let mut state = ProgressionState::from_xp(150);
        let level_up = state.credit(100).expect("should level up");
        assert_eq!(state.current_xp, 250);
        assert_eq!(level_up.old_level, 2);
        assert_eq!(level_up.new_level, 3);
        assert_eq!(level_up.new_title, "Dedicated Scholar");

        assert!(state.credit(10).is_none());
        assert_eq!(state.current_xp, 260);
    }

    #[test]
    fn test_credit_skipping_levels_reports_final_level_once() {
        let mut state = ProgressionState::default();
        let level_up = state.credit(1200).expect("should level up");
        assert_eq!(level_up.old_level, 1);
        assert_eq!(level_up.new_level, 5);
    }

    #[test]
    fn test_credit_past_last_level_keeps_accumulating() {
        let mut state = ProgressionState::from_xp(12000);
        assert!(state.credit(5000).is_none());
        assert_eq!(state.current_xp, 17000);
        assert_eq!(state.level, 10);
    }

    #[test]
    fn test_progress_in_level() {
        let progress = ProgressionState::from_xp(175).progress(); // Between 100 and 250
        assert_eq!(progress.current, 75);
        assert_eq!(progress.total, 150);
        assert!((progress.percentage - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_progress_at_terminal_level() {
        let progress = ProgressionState::from_xp(13000).progress();
        assert_eq!(progress.current, 1000);
        assert_eq!(progress.total, 1);
        assert!((progress.percentage - 100.0).abs() < 0.01);
    }
}
