//! Progress Tracker - Core gamification logic
//!
//! Owns the four progress collections, feeds stat changes through the
//! achievement and challenge checkers, credits XP and writes every mutation
//! straight through to the injected store.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use super::challenges::{Challenge, ChallengeId, DailyChallenges};
use super::checker::{check_achievements, check_challenges};
use super::definitions::{Achievement, AchievementId};
use super::levels::{LevelProgress, LevelUp, ProgressionState};
use super::persist;
use super::stats::{
    TasksChanged, UserStats, DEFAULT_EARLY_SESSION_CUTOFF_HOUR, DEFAULT_MINUTES_PER_TASK,
};
use super::streaks::{hour_of, today};
use super::view::ProgressView;
use crate::store::ProgressStore;

/// An achievement that was just unlocked
#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
}

/// A daily challenge that was just completed
#[derive(Debug, Clone)]
pub struct CompletedChallenge {
    pub challenge: &'static Challenge,
    /// Claimed by the user rather than completed automatically
    pub manual: bool,
}

/// Events that can happen during gamification checks
#[derive(Debug, Clone)]
pub enum GamificationEvent {
    AchievementUnlocked(UnlockedAchievement),
    ChallengeCompleted(CompletedChallenge),
    LevelUp(LevelUp),
    XpAwarded { amount: u32, reason: String },
    /// A new local day started and today's challenge completions were cleared
    ChallengesReset { date: NaiveDate },
}

impl fmt::Display for GamificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AchievementUnlocked(u) => write!(
                f,
                "{} Achievement unlocked: {} (+{} XP)",
                u.achievement.icon, u.achievement.name, u.achievement.xp_reward
            ),
            Self::ChallengeCompleted(c) => write!(
                f,
                "{} Challenge completed: {} (+{} XP)",
                c.challenge.icon, c.challenge.name, c.challenge.xp_reward
            ),
            Self::LevelUp(l) => write!(f, "Level up! Level {}: {}", l.new_level, l.new_title),
            Self::XpAwarded { amount, reason } => write!(f, "+{} XP ({})", amount, reason),
            Self::ChallengesReset { date } => {
                write!(f, "📅 New day ({}): daily challenges reset", date)
            }
        }
    }
}

/// Why a manual challenge claim was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("Unknown challenge id: {0}")]
    UnknownChallenge(u32),

    #[error("Challenge '{0}' was already completed today")]
    AlreadyCompleted(&'static str),

    #[error("Challenge '{0}' is not complete yet")]
    NotEligible(&'static str),
}

/// Tunables for stat aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Focus minutes credited per completed task
    pub minutes_per_task: u32,
    /// Sessions starting before this local hour count as early
    pub early_session_cutoff_hour: u32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            minutes_per_task: DEFAULT_MINUTES_PER_TASK,
            early_session_cutoff_hour: DEFAULT_EARLY_SESSION_CUTOFF_HOUR,
        }
    }
}

/// Main holder for all progression state
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
    settings: TrackerSettings,
    progression: ProgressionState,
    stats: UserStats,
    achievements: BTreeSet<AchievementId>,
    challenges: DailyChallenges,
}

impl ProgressTracker {
    /// Load state from the store using default settings and today's date
    pub fn load(store: Box<dyn ProgressStore>) -> Self {
        Self::load_with(store, TrackerSettings::default(), today())
    }

    /// Load state from the store, running the day-boundary check for `today`
    pub fn load_with(store: Box<dyn ProgressStore>, settings: TrackerSettings, today: NaiveDate) -> Self {
        let mut tracker = Self {
            progression: persist::load_progression(store.as_ref()),
            stats: persist::load_stats(store.as_ref()),
            achievements: persist::load_achievements(store.as_ref()),
            challenges: persist::load_challenges(store.as_ref()),
            store,
            settings,
        };

        debug!(
            "Loaded progress: level {} ({} XP), {} achievements, {} challenges today",
            tracker.progression.level,
            tracker.progression.current_xp,
            tracker.achievements.len(),
            tracker.challenges.completed.len()
        );

        tracker.check_daily_reset_on(today);
        tracker
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn unlocked_achievements(&self) -> &BTreeSet<AchievementId> {
        &self.achievements
    }

    pub fn completed_challenges(&self) -> &BTreeSet<ChallengeId> {
        &self.challenges.completed
    }

    /// Day the challenge completions belong to
    pub fn reset_date(&self) -> Option<NaiveDate> {
        self.challenges.reset_date
    }

    pub fn level_progress(&self) -> LevelProgress {
        self.progression.progress()
    }

    /// Derived view model for rendering
    pub fn view(&self) -> ProgressView {
        ProgressView::build(
            &self.progression,
            &self.stats,
            &self.achievements,
            &self.challenges,
        )
    }

    // ========================================
    // XP & LEVEL OPERATIONS
    // ========================================

    /// Award XP and check for level up.
    ///
    /// Not idempotent: every call credits. Callers credit each unlock once.
    pub fn credit_xp(&mut self, amount: u32, reason: &str) -> Vec<GamificationEvent> {
        let mut events = Vec::new();
        let level_up = self.progression.credit(amount);
        persist::save_progression(self.store.as_ref(), &self.progression);

        events.push(GamificationEvent::XpAwarded {
            amount,
            reason: reason.to_string(),
        });

        if let Some(level_up) = level_up {
            info!(
                "Level up: {} -> {} ({})",
                level_up.old_level, level_up.new_level, level_up.new_title
            );
            events.push(GamificationEvent::LevelUp(level_up));
        }

        events
    }

    // ========================================
    // STAT FEEDS
    // ========================================

    /// Replace the stat collection and re-run both checkers.
    ///
    /// The new stats are persisted only when they differ; evaluation always runs.
    pub fn update_stats(&mut self, update: impl FnOnce(&mut UserStats)) -> Vec<GamificationEvent> {
        let mut stats = self.stats.clone();
        update(&mut stats);

        if stats != self.stats {
            self.stats = stats;
            persist::save_stats(self.store.as_ref(), &self.stats);
        }

        self.evaluate()
    }

    /// Apply a "tasks changed" notification
    pub fn tasks_changed(&mut self, event: &TasksChanged) -> Vec<GamificationEvent> {
        let minutes_per_task = self.settings.minutes_per_task;
        self.update_stats(|stats| stats.apply_tasks(event, minutes_per_task))
    }

    /// Record a finished focus session; also counts as study activity for the day
    pub fn record_focus_session(&mut self, minutes: u32, started_at: NaiveDateTime) -> Vec<GamificationEvent> {
        let cutoff = self.settings.early_session_cutoff_hour;
        self.update_stats(|stats| {
            stats.record_focus_session(minutes, hour_of(started_at), cutoff);
            stats.record_activity(started_at.date());
        })
    }

    pub fn record_flashcards_created(&mut self, count: u32) -> Vec<GamificationEvent> {
        self.update_stats(|stats| stats.record_flashcards(count))
    }

    pub fn record_quiz_result(&mut self, score_percent: u8) -> Vec<GamificationEvent> {
        self.update_stats(|stats| stats.record_quiz_result(score_percent))
    }

    /// Mark `day` as a study day for streak tracking
    pub fn record_activity(&mut self, day: NaiveDate) -> Vec<GamificationEvent> {
        self.update_stats(|stats| stats.record_activity(day))
    }

    // ========================================
    // EVALUATION
    // ========================================

    /// Run the achievement and challenge checkers against current stats
    pub fn evaluate(&mut self) -> Vec<GamificationEvent> {
        let mut events = Vec::new();

        for id in check_achievements(&self.stats, &self.achievements) {
            events.extend(self.unlock_achievement(id));
        }

        for id in check_challenges(&self.stats, &self.challenges.completed) {
            events.extend(self.complete_challenge(id, false));
        }

        debug!("Evaluation pass produced {} events", events.len());
        events
    }

    /// Unlock an achievement; already unlocked ids are a no-op
    fn unlock_achievement(&mut self, id: AchievementId) -> Vec<GamificationEvent> {
        if !self.achievements.insert(id) {
            return Vec::new();
        }
        persist::save_achievements(self.store.as_ref(), &self.achievements);

        let achievement = Achievement::get(id);
        info!("Achievement unlocked: {} (+{} XP)", achievement.name, achievement.xp_reward);

        let mut events = vec![GamificationEvent::AchievementUnlocked(UnlockedAchievement {
            achievement,
        })];
        events.extend(self.credit_xp(
            achievement.xp_reward,
            &format!("achievement: {}", achievement.name),
        ));
        events
    }

    fn complete_challenge(&mut self, id: ChallengeId, manual: bool) -> Vec<GamificationEvent> {
        if !self.challenges.completed.insert(id) {
            return Vec::new();
        }
        persist::save_challenges(self.store.as_ref(), &self.challenges);

        let challenge = Challenge::get(id);
        info!(
            "Challenge completed{}: {} (+{} XP)",
            if manual { " (claimed)" } else { "" },
            challenge.name,
            challenge.xp_reward
        );

        let mut events = vec![GamificationEvent::ChallengeCompleted(CompletedChallenge {
            challenge,
            manual,
        })];
        events.extend(self.credit_xp(
            challenge.xp_reward,
            &format!("daily challenge: {}", challenge.name),
        ));
        events
    }

    // ========================================
    // DAILY CHALLENGES
    // ========================================

    /// Clear today's completions when `today` differs from the stored reset date.
    ///
    /// Does not re-run automatic completion; challenges whose rule already
    /// holds become claimable and complete on the next stat change.
    pub fn check_daily_reset_on(&mut self, today: NaiveDate) -> bool {
        let previous = self.challenges.reset_date;
        if !self.challenges.roll_over(today) {
            return false;
        }
        persist::save_challenges(self.store.as_ref(), &self.challenges);

        info!(
            "Daily challenges reset for {} (previous reset: {})",
            today,
            previous.map(|d| d.to_string()).unwrap_or_else(|| "never".to_string())
        );
        true
    }

    /// Whether a challenge's rule currently holds
    pub fn can_complete(&self, id: ChallengeId) -> bool {
        Challenge::get(id).can_complete(&self.stats)
    }

    /// Manually claim a daily challenge
    pub fn claim_challenge(&mut self, id: ChallengeId) -> Result<Vec<GamificationEvent>, ClaimError> {
        let challenge = Challenge::get(id);

        if self.challenges.is_completed(id) {
            return Err(ClaimError::AlreadyCompleted(challenge.name));
        }
        if !self.can_complete(id) {
            return Err(ClaimError::NotEligible(challenge.name));
        }

        Ok(self.complete_challenge(id, true))
    }

    /// Claim a challenge by its numeric id
    pub fn claim_challenge_number(&mut self, number: u32) -> Result<Vec<GamificationEvent>, ClaimError> {
        let id = ChallengeId::from_number(number).ok_or(ClaimError::UnknownChallenge(number))?;
        self.claim_challenge(id)
    }

    // ========================================
    // RESET
    // ========================================

    /// Restore every collection to its default and persist the result
    pub fn reset_all(&mut self) {
        self.progression = ProgressionState::default();
        self.stats = UserStats::default();
        self.achievements.clear();
        self.challenges = DailyChallenges {
            completed: BTreeSet::new(),
            reset_date: self.challenges.reset_date,
        };

        persist::save_progression(self.store.as_ref(), &self.progression);
        persist::save_stats(self.store.as_ref(), &self.stats);
        persist::save_achievements(self.store.as_ref(), &self.achievements);
        persist::save_challenges(self.store.as_ref(), &self.challenges);

        info!("All progress has been reset");
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("settings", &self.settings)
            .field("progression", &self.progression)
            .field("stats", &self.stats)
            .field("achievements", &self.achievements)
            .field("challenges", &self.challenges)
            .finish_non_exhaustive()
    }
}
