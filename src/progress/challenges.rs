//! Daily Challenge System
//!
//! Three challenges that can each be completed once per local calendar day.
//! Completions are cleared unconditionally when the day changes.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::definitions::{Progress, Requirement};
use super::stats::{StatMetric, UserStats};

/// Unique identifier for each challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChallengeId {
    StudyTasks,
    FocusHour,
    Flashcards,
}

impl ChallengeId {
    /// Stable numeric id used in durable records (1-based)
    pub fn number(&self) -> u32 {
        match self {
            Self::StudyTasks => 1,
            Self::FocusHour => 2,
            Self::Flashcards => 3,
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::StudyTasks),
            2 => Some(Self::FocusHour),
            3 => Some(Self::Flashcards),
            _ => None,
        }
    }


    /// Get all challenge IDs in order
    pub fn all() -> &'static [ChallengeId] {
        &[Self::StudyTasks, Self::FocusHour, Self::Flashcards]
    }
}

/// Challenge definition with all metadata
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: ChallengeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u32,
    pub requirement: Requirement,
}

/// All daily challenge definitions, ordered by numeric id
pub static CHALLENGES: &[Challenge] = &[
    Challenge {
        id: ChallengeId::StudyTasks,
        name: "Complete 2 study tasks",
        description: "Finish two tasks from your study plan",
        icon: "✅",
        xp_reward: 30,
        requirement: Requirement::new(StatMetric::CompletedTasks, 2),
    },
    Challenge {
        id: ChallengeId::FocusHour,
        name: "Study for 1 hour straight",
        description: "Reach 60 minutes of focused study",
        icon: "⏳",
        xp_reward: 25,
        requirement: Requirement::new(StatMetric::FocusTimeMinutes, 60),
    },
    Challenge {
        id: ChallengeId::Flashcards,
        name: "Create 5 flashcards",
        description: "Add five new flashcards to your decks",
        icon: "🗂️",
        xp_reward: 20,
        requirement: Requirement::new(StatMetric::FlashcardsCreated, 5),
    },
];

impl Challenge {
    /// Get challenge definition by ID
    pub fn get(id: ChallengeId) -> &'static Challenge {
        &CHALLENGES[(id.number() - 1) as usize]
    }

    /// Get total number of challenges
    pub fn total_count() -> usize {
        CHALLENGES.len()
    }

    /// Get total XP available per day
    pub fn total_xp() -> u32 {
        CHALLENGES.iter().map(|c| c.xp_reward).sum()
    }

    /// Whether the rule currently holds for the stat snapshot
    pub fn can_complete(&self, stats: &UserStats) -> bool {
        self.requirement.is_met(stats)
    }

    pub fn progress(&self, stats: &UserStats) -> Progress {
        self.requirement.progress(stats)
    }
}

/// Today's completed challenges plus the day they belong to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyChallenges {
    pub completed: BTreeSet<ChallengeId>,
    pub reset_date: Option<NaiveDate>,
}

impl DailyChallenges {
    /// Clear completions if `today` differs from the recorded reset date.
    ///
    /// Returns true when a reset happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.reset_date == Some(today) {
            return false;
        }
        self.completed.clear();
        self.reset_date = Some(today);
        true
    }

    pub fn is_completed(&self, id: ChallengeId) -> bool {
        self.completed.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_challenge_count() {
        assert_eq!(CHALLENGES.len(), 3);
        assert_eq!(ChallengeId::all().len(), Challenge::total_count());
    }

    #[test]
    fn test_table_order_matches_ids() {
        for (i, challenge) in CHALLENGES.iter().enumerate() {
            assert_eq!(challenge.id.number(), (i + 1) as u32);
            assert_eq!(ChallengeId::from_number(challenge.id.number()), Some(challenge.id));
        }
    }

    #[test]
    fn test_total_xp() {
        assert_eq!(Challenge::total_xp(), 75);
    }

    #[test]
    fn test_roll_over_clears_on_new_day() {
        let mut daily = DailyChallenges {
            completed: ChallengeId::all().iter().copied().collect(),
            reset_date: Some(day(1)),
        };

        assert!(!daily.roll_over(day(1)));
        assert_eq!(daily.completed.len(), 3);

        assert!(daily.roll_over(day(2)));
        assert!(daily.completed.is_empty());
        assert_eq!(daily.reset_date, Some(day(2)));
    }

    #[test]
    fn test_roll_over_without_marker() {
        let mut daily = DailyChallenges::default();
        daily.completed.insert(ChallengeId::Flashcards);
        assert!(daily.roll_over(day(3)));
        assert!(daily.completed.is_empty());
        assert_eq!(daily.reset_date, Some(day(3)));
    }

    #[test]
    fn test_can_complete() {
        let mut stats = UserStats::default();
        let challenge = Challenge::get(ChallengeId::FocusHour);
        stats.focus_time_minutes = 59;
        assert!(!challenge.can_complete(&stats));
        stats.focus_time_minutes = 60;
        assert!(challenge.can_complete(&stats));
    }
}
