//! Gamification system: XP, Levels, Achievements, Daily Challenges and Streaks
//!
//! # Flow
//!
//! ```text
//! activity event ──► UserStats ──► achievement / challenge checkers
//!                                          │ newly satisfied
//!                                          ▼
//!                             credit XP ──► level recomputed ──► LevelUp
//! ```
//!
//! Every mutation is written through to a [`ProgressStore`](crate::store::ProgressStore).

mod challenges;
mod checker;
mod definitions;
mod levels;
mod manager;
mod persist;
mod stats;
mod streaks;
mod view;

pub use challenges::{Challenge, ChallengeId, DailyChallenges, CHALLENGES};
pub use checker::{check_achievements, check_challenges};
pub use definitions::{Achievement, AchievementId, Progress, Requirement, ACHIEVEMENTS};
pub use levels::{Level, LevelProgress, LevelUp, ProgressionState, LEVELS, TERMINAL_TITLE};
pub use manager::{
    ClaimError, CompletedChallenge, GamificationEvent, ProgressTracker, TrackerSettings,
    UnlockedAchievement,
};
pub use stats::{
    StatMetric, TaskSnapshot, TasksChanged, UserStats, DEFAULT_EARLY_SESSION_CUTOFF_HOUR,
    DEFAULT_MINUTES_PER_TASK, PERFECT_QUIZ_SCORE,
};
pub use streaks::{next_streak, now_local, today};
pub use view::{AchievementView, ChallengeView, ProgressView};
