//! Achievement and challenge checking logic
//!
//! Pure functions: given a stat snapshot and what is already completed,
//! return the ids that should be completed now.

use std::collections::BTreeSet;

use super::challenges::{ChallengeId, CHALLENGES};
use super::definitions::{AchievementId, ACHIEVEMENTS};
use super::stats::UserStats;

/// Achievements whose rule holds and which are not yet unlocked
pub fn check_achievements(
    stats: &UserStats,
    unlocked: &BTreeSet<AchievementId>,
) -> Vec<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.contains(&a.id))
        .filter(|a| a.requirement.is_met(stats))
        .map(|a| a.id)
        .collect()
}

/// Challenges whose rule holds and which are not yet completed today
pub fn check_challenges(stats: &UserStats, completed: &BTreeSet<ChallengeId>) -> Vec<ChallengeId> {
    CHALLENGES
        .iter()
        .filter(|c| !completed.contains(&c.id))
        .filter(|c| c.can_complete(stats))
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_unlocks_on_defaults() {
        let stats = UserStats::default();
        assert!(check_achievements(&stats, &BTreeSet::new()).is_empty());
        assert!(check_challenges(&stats, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_streak_unlocks_perfect_streak() {
        let mut stats = UserStats::default();
        stats.streak_days = 6;
        assert!(check_achievements(&stats, &BTreeSet::new()).is_empty());

        stats.streak_days = 7;
        assert_eq!(
            check_achievements(&stats, &BTreeSet::new()),
            vec![AchievementId::PerfectStreak]
        );
    }

    #[test]
    fn test_already_unlocked_is_skipped() {
        let mut stats = UserStats::default();
        stats.streak_days = 30;
        let unlocked = BTreeSet::from([AchievementId::PerfectStreak]);
        assert!(check_achievements(&stats, &unlocked).is_empty());
    }

    #[test]
    fn test_subject_master_uses_top_subject() {
        let mut stats = UserStats::default();
        stats.subject_counts.insert("Math".to_string(), 49);
        stats.subject_counts.insert("Biology".to_string(), 30);
        assert!(check_achievements(&stats, &BTreeSet::new()).is_empty());

        stats.subject_counts.insert("Biology".to_string(), 50);
        assert_eq!(
            check_achievements(&stats, &BTreeSet::new()),
            vec![AchievementId::SubjectMaster]
        );
    }

    #[test]
    fn test_multiple_challenges_in_one_pass() {
        let mut stats = UserStats::default();
        stats.completed_tasks = 3;
        stats.focus_time_minutes = 90;

        assert_eq!(
            check_challenges(&stats, &BTreeSet::new()),
            vec![ChallengeId::StudyTasks, ChallengeId::FocusHour]
        );

        let completed = BTreeSet::from([ChallengeId::StudyTasks]);
        assert_eq!(check_challenges(&stats, &completed), vec![ChallengeId::FocusHour]);
    }
}
