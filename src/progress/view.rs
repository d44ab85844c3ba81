//! Derived view model consumed by rendering code.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::challenges::{DailyChallenges, CHALLENGES};
use super::definitions::{Achievement, AchievementId, Progress, ACHIEVEMENTS};
use super::levels::{LevelProgress, ProgressionState};
use super::stats::{StatMetric, UserStats};

#[derive(Debug, Clone, Serialize)]
pub struct AchievementView {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u32,
    pub completed: bool,
    /// Counter the unlock rule reads
    pub metric: StatMetric,
    /// Only reported for locked achievements with a target above 1
    pub progress: Option<Progress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChallengeView {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u32,
    pub completed: bool,
    pub can_complete: bool,
    pub metric: StatMetric,
    /// Eligible and not yet completed today
    pub claimable: bool,
    pub progress: Progress,
}

/// Snapshot of everything the progress screen shows
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub level: u32,
    pub title: String,
    pub current_xp: u32,
    pub next_level_xp: u32,
    pub level_progress: LevelProgress,
    pub streak_days: u32,
    pub achievements: Vec<AchievementView>,
    pub challenges: Vec<ChallengeView>,
    pub unlocked_count: usize,
    pub total_achievements: usize,
    pub total_achievement_xp: u32,
    pub challenges_date: Option<NaiveDate>,
}

impl ProgressView {
    pub fn build(
        progression: &ProgressionState,
        stats: &UserStats,
        unlocked: &BTreeSet<AchievementId>,
        daily: &DailyChallenges,
    ) -> Self {
        let achievements = ACHIEVEMENTS
            .iter()
            .map(|a| {
                let completed = unlocked.contains(&a.id);
                AchievementView {
                    id: a.id.number(),
                    name: a.name,
                    description: a.description,
                    icon: a.icon,
                    xp_reward: a.xp_reward,
                    completed,
                    metric: a.requirement.metric,
                    progress: if completed { None } else { a.progress(stats) },
                }
            })
            .collect();

        let challenges = CHALLENGES
            .iter()
            .map(|c| {
                let completed = daily.is_completed(c.id);
                let can_complete = c.can_complete(stats);
                ChallengeView {
                    id: c.id.number(),
                    name: c.name,
                    description: c.description,
                    icon: c.icon,
                    xp_reward: c.xp_reward,
                    completed,
                    can_complete,
                    metric: c.requirement.metric,
                    claimable: can_complete && !completed,
                    progress: c.progress(stats),
                }
            })
            .collect();

        Self {
            level: progression.level,
            title: progression.title.clone(),
            current_xp: progression.current_xp,
            next_level_xp: progression.next_level_xp,
            level_progress: progression.progress(),
            streak_days: stats.streak_days,
            achievements,
            challenges,
            unlocked_count: unlocked.len(),
            total_achievements: Achievement::total_count(),
            total_achievement_xp: Achievement::total_xp(),
            challenges_date: daily.reset_date,
        }
    }
}
