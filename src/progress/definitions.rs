//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock rules and rewards.
//! Rules are data (`metric >= target`) rather than closures so they can be
//! listed, serialized and tested directly.

use serde::Serialize;

use super::stats::{StatMetric, UserStats};

/// Unlock rule: a stat metric reaching a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub metric: StatMetric,
    pub target: u32,
}

impl Requirement {
    pub const fn new(metric: StatMetric, target: u32) -> Self {
        Self { metric, target }
    }

    pub fn is_met(&self, stats: &UserStats) -> bool {
        self.metric.read(stats) >= self.target
    }

    /// Current value clamped to the target
    pub fn progress(&self, stats: &UserStats) -> Progress {
        Progress {
            progress: self.metric.read(stats).min(self.target),
            total: self.target,
        }
    }
}

/// Read-only progress toward a target, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub progress: u32,
    pub total: u32,
}

impl Progress {
    /// Progress fraction (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.progress as f32 / self.total as f32).min(1.0)
        }
    }
}

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    EarlyBird,
    PerfectStreak,
    SubjectMaster,
    QuizChampion,
    MarathonLearner,
}

impl AchievementId {
    /// Stable numeric id used in durable records (1-based)
    pub fn number(&self) -> u32 {
        match self {
            Self::EarlyBird => 1,
            Self::PerfectStreak => 2,
            Self::SubjectMaster => 3,
            Self::QuizChampion => 4,
            Self::MarathonLearner => 5,
        }
    }

    /// Parse from a durable numeric id
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::EarlyBird),
            2 => Some(Self::PerfectStreak),
            3 => Some(Self::SubjectMaster),
            4 => Some(Self::QuizChampion),
            5 => Some(Self::MarathonLearner),
            _ => None,
        }
    }


    /// Get all achievement IDs
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::EarlyBird,
            Self::PerfectStreak,
            Self::SubjectMaster,
            Self::QuizChampion,
            Self::MarathonLearner,
        ]
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u32,
    pub requirement: Requirement,
}

/// All achievement definitions, ordered by numeric id
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::EarlyBird,
        name: "Early Bird",
        description: "Complete 5 study sessions before 8 AM",
        icon: "🌅",
        xp_reward: 50,
        requirement: Requirement::new(StatMetric::EarlySessions, 5),
    },
    Achievement {
        id: AchievementId::PerfectStreak,
        name: "Perfect Streak",
        description: "Maintain a 7-day study streak",
        icon: "🔥",
        xp_reward: 100,
        requirement: Requirement::new(StatMetric::StreakDays, 7),
    },
    Achievement {
        id: AchievementId::SubjectMaster,
        name: "Subject Master",
        description: "Complete 50 tasks in a single subject",
        icon: "📚",
        xp_reward: 200,
        requirement: Requirement::new(StatMetric::TopSubjectCount, 50),
    },
    Achievement {
        id: AchievementId::QuizChampion,
        name: "Quiz Champion",
        description: "Score 100% on 5 quizzes in a row",
        icon: "🏆",
        xp_reward: 150,
        requirement: Requirement::new(StatMetric::HighScoreStreak, 5),
    },
    Achievement {
        id: AchievementId::MarathonLearner,
        name: "Marathon Learner",
        description: "Study for 4 hours in a single session",
        icon: "⏱️",
        xp_reward: 250,
        requirement: Requirement::new(StatMetric::LongestSessionMinutes, 240),
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        &ACHIEVEMENTS[(id.number() - 1) as usize]
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }

    /// Get total possible XP from all achievements
    pub fn total_xp() -> u32 {
        ACHIEVEMENTS.iter().map(|a| a.xp_reward).sum()
    }

    /// Progress toward a locked achievement; only multi-step targets report it
    pub fn progress(&self, stats: &UserStats) -> Option<Progress> {
        (self.requirement.target > 1).then(|| self.requirement.progress(stats))
    }
}
