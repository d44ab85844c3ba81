//! Shared test utilities for progress integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use studyquest::store::{MemoryStore, ProgressStore, RecordKey};
use studyquest::{ProgressTracker, ProgressionState, TaskSnapshot, TasksChanged, TrackerSettings, UserStats};

/// A fixed local date used as "today" in tests
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).expect("valid test date")
}

/// Tracker over a fresh memory store; the returned store shares its records
pub fn tracker_on(today: NaiveDate) -> (ProgressTracker, MemoryStore) {
    let store = MemoryStore::new();
    let tracker = ProgressTracker::load_with(Box::new(store.clone()), TrackerSettings::default(), today);
    (tracker, store)
}

/// Reload a tracker from an existing store
pub fn reload(store: &MemoryStore, today: NaiveDate) -> ProgressTracker {
    ProgressTracker::load_with(Box::new(store.clone()), TrackerSettings::default(), today)
}

/// Seed a store with a progression record at `xp`
pub fn seed_xp(store: &MemoryStore, xp: u32) {
    let json = serde_json::to_string(&ProgressionState::from_xp(xp)).expect("encode progression");
    store.write(RecordKey::Progression, &json).expect("seed progression");
}

/// Seed a store with a stats record
pub fn seed_stats(store: &MemoryStore, stats: &UserStats) {
    let json = serde_json::to_string(stats).expect("encode stats");
    store.write(RecordKey::UserStats, &json).expect("seed stats");
}

/// `completed` finished tasks in `subject`, plus `open` unfinished ones
pub fn tasks(subject: &str, completed: usize, open: usize) -> TasksChanged {
    let mut list: Vec<_> = (0..completed).map(|_| TaskSnapshot::new(subject, true)).collect();
    list.extend((0..open).map(|_| TaskSnapshot::new(subject, false)));
    TasksChanged::from_tasks(list)
}
