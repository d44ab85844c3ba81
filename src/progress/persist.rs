//! Record encoding between tracker state and the text store.
//!
//! Each record loads independently: a missing, unreadable or corrupt record
//! falls back to its default and never affects the other three.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::challenges::{ChallengeId, DailyChallenges};
use super::definitions::AchievementId;
use super::levels::ProgressionState;
use super::stats::UserStats;
use crate::store::{ProgressStore, RecordKey};

/// Stored form of the unlocked achievement set
#[derive(Debug, Default, Serialize, Deserialize)]
struct AchievementsRecord {
    #[serde(default)]
    unlocked: Vec<u32>,
}

/// Stored form of today's challenge completions
#[derive(Debug, Default, Serialize, Deserialize)]
struct DailyChallengesRecord {
    #[serde(default)]
    completed: Vec<u32>,
    #[serde(default)]
    reset_date: Option<NaiveDate>,
}

fn load_record<T: DeserializeOwned>(store: &dyn ProgressStore, key: RecordKey) -> Option<T> {
    let text = match store.read(key) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read {} record, using defaults: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Corrupt {} record, using defaults: {}", key, e);
            None
        }
    }
}

fn save_record<T: Serialize>(store: &dyn ProgressStore, key: RecordKey, value: &T) {
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to encode {} record: {}", key, e);
            return;
        }
    };

    if let Err(e) = store.write(key, &text) {
        warn!("Failed to persist {} record: {}", key, e);
    }
}

pub(super) fn load_progression(store: &dyn ProgressStore) -> ProgressionState {
    // Derived fields are recomputed so a hand-edited record cannot disagree with its XP
    load_record::<ProgressionState>(store, RecordKey::Progression)
        .map(|state| ProgressionState::from_xp(state.current_xp))
        .unwrap_or_default()
}

pub(super) fn save_progression(store: &dyn ProgressStore, state: &ProgressionState) {
    save_record(store, RecordKey::Progression, state);
}

pub(super) fn load_stats(store: &dyn ProgressStore) -> UserStats {
    let mut stats: UserStats = load_record(store, RecordKey::UserStats).unwrap_or_default();
    stats.streak_days = stats.streak_days.max(1);
    stats
}

pub(super) fn save_stats(store: &dyn ProgressStore, stats: &UserStats) {
    save_record(store, RecordKey::UserStats, stats);
}

pub(super) fn load_achievements(store: &dyn ProgressStore) -> BTreeSet<AchievementId> {
    let record: AchievementsRecord =
        load_record(store, RecordKey::Achievements).unwrap_or_default();

    record
        .unlocked
        .into_iter()
        .filter_map(|n| {
            let id = AchievementId::from_number(n);
            if id.is_none() {
                warn!("Ignoring unknown achievement id {} in stored record", n);
            }
            id
        })
        .collect()
}

pub(super) fn save_achievements(store: &dyn ProgressStore, unlocked: &BTreeSet<AchievementId>) {
    let record = AchievementsRecord {
        unlocked: unlocked.iter().map(|id| id.number()).collect(),
    };
    save_record(store, RecordKey::Achievements, &record);
}

pub(super) fn load_challenges(store: &dyn ProgressStore) -> DailyChallenges {
    let record: DailyChallengesRecord =
        load_record(store, RecordKey::DailyChallenges).unwrap_or_default();

    let completed = record
        .completed
        .into_iter()
        .filter_map(|n| {
            let id = ChallengeId::from_number(n);
            if id.is_none() {
                warn!("Ignoring unknown challenge id {} in stored record", n);
            }
            id
        })
        .collect();

    DailyChallenges {
        completed,
        reset_date: record.reset_date,
    }
}

pub(super) fn save_challenges(store: &dyn ProgressStore, daily: &DailyChallenges) {
    let record = DailyChallengesRecord {
        completed: daily.completed.iter().map(|id| id.number()).collect(),
        reset_date: daily.reset_date,
    };
    save_record(store, RecordKey::DailyChallenges, &record);
}
