//! Tests for the tokio progress service

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use common::{day, tasks, tracker_on};
use studyquest::service::{start_progress_service_with_clock, ServiceError};
use studyquest::{ChallengeId, ClaimError, GamificationEvent};

const TICK: Duration = Duration::from_secs(60);

fn fixed_day() -> NaiveDate {
    day(5)
}

#[tokio::test]
async fn test_events_are_returned_and_broadcast() {
    let (tracker, _store) = tracker_on(fixed_day());
    let (handle, task) = start_progress_service_with_clock(tracker, TICK, fixed_day);
    let mut events = handle.subscribe();

    let returned = handle.tasks_changed(tasks("Math", 2, 0)).await.unwrap();
    assert!(!returned.is_empty());

    let mut received = Vec::new();
    for _ in 0..returned.len() {
        received.push(events.recv().await.unwrap().to_string());
    }
    let returned: Vec<String> = returned.iter().map(ToString::to_string).collect();
    assert_eq!(received, returned);

    handle.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_claim_errors_surface_through_handle() {
    let (tracker, _store) = tracker_on(fixed_day());
    let (handle, task) = start_progress_service_with_clock(tracker, TICK, fixed_day);

    let err = handle.claim_challenge(ChallengeId::Flashcards).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Claim(ClaimError::NotEligible("Create 5 flashcards"))
    ));

    handle.record_flashcards_created(5).await.unwrap();
    let err = handle.claim_challenge(ChallengeId::Flashcards).await.unwrap_err();
    assert!(matches!(err, ServiceError::Claim(ClaimError::AlreadyCompleted(_))));

    handle.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_view_and_quiz_results() {
    let (tracker, _store) = tracker_on(fixed_day());
    let (handle, task) = start_progress_service_with_clock(tracker, TICK, fixed_day);

    for _ in 0..5 {
        handle.record_quiz_result(100).await.unwrap();
    }

    let view = handle.view().await.unwrap();
    assert_eq!(view.current_xp, 150);
    assert_eq!(view.unlocked_count, 1);
    assert_eq!(view.challenges_date, Some(fixed_day()));
    assert!(!handle.check_daily_reset().await.unwrap());

    handle.shutdown().await;
    task.await.unwrap();
}

static TICKING_DAY: AtomicU32 = AtomicU32::new(5);

fn ticking_clock() -> NaiveDate {
    day(TICKING_DAY.load(Ordering::SeqCst))
}

#[tokio::test]
async fn test_tick_resets_challenges_at_day_boundary() {
    let (tracker, _store) = tracker_on(day(5));
    let (handle, task) =
        start_progress_service_with_clock(tracker, Duration::from_millis(20), ticking_clock);

    handle.tasks_changed(tasks("Math", 3, 0)).await.unwrap();
    assert_eq!(handle.view().await.unwrap().challenges.iter().filter(|c| c.completed).count(), 2);

    let mut events = handle.subscribe();
    TICKING_DAY.store(6, Ordering::SeqCst);

    let reset = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let GamificationEvent::ChallengesReset { date } = events.recv().await.unwrap() {
                return date;
            }
        }
    })
    .await
    .expect("tick should cross the day boundary");
    assert_eq!(reset, day(6));

    let view = handle.view().await.unwrap();
    assert_eq!(view.challenges_date, Some(day(6)));
    assert!(view.challenges.iter().all(|c| !c.completed));
    assert!(view.challenges[0].claimable);

    handle.shutdown().await;
    let tracker = task.await.unwrap();
    assert!(tracker.completed_challenges().is_empty());
    assert_eq!(tracker.progression().current_xp, 55);
}

static MANUAL_DAY: AtomicU32 = AtomicU32::new(5);

fn manual_clock() -> NaiveDate {
    day(MANUAL_DAY.load(Ordering::SeqCst))
}

#[tokio::test]
async fn test_explicit_day_check_publishes_reset() {
    let (tracker, _store) = tracker_on(day(5));
    let (handle, task) = start_progress_service_with_clock(tracker, TICK, manual_clock);
    let mut events = handle.subscribe();

    MANUAL_DAY.store(7, Ordering::SeqCst);
    assert!(handle.check_daily_reset().await.unwrap());
    assert!(!handle.check_daily_reset().await.unwrap());

    let event = events.recv().await.unwrap();
    assert!(matches!(event, GamificationEvent::ChallengesReset { date } if date == day(7)));
    assert_eq!(event.to_string(), "📅 New day (2026-10-07): daily challenges reset");

    handle.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_shutdown_returns_tracker() {
    let (tracker, store) = tracker_on(fixed_day());
    let (handle, task) = start_progress_service_with_clock(tracker, TICK, fixed_day);
    let mut events = handle.subscribe();

    handle.tasks_changed(tasks("History", 3, 0)).await.unwrap();
    handle.shutdown().await;

    let tracker = task.await.unwrap();
    assert_eq!(tracker.stats().completed_tasks, 3);
    assert_eq!(tracker.progression().current_xp, 55);
    assert!(store.get(studyquest::store::RecordKey::Progression).is_some());

    // Commands after shutdown fail cleanly
    assert!(matches!(handle.view().await, Err(ServiceError::Stopped)));

    let mut awarded = 0;
    while let Ok(event) = events.try_recv() {
        if let GamificationEvent::XpAwarded { amount, .. } = event {
            awarded += amount;
        }
    }
    assert_eq!(awarded, 55);
}

#[tokio::test]
async fn test_dropping_every_handle_stops_service() {
    let (tracker, _store) = tracker_on(fixed_day());
    let (handle, task) =
        start_progress_service_with_clock(tracker, Duration::from_secs(1), fixed_day);

    handle.reset_all().await.unwrap();
    drop(handle);

    let tracker = task.await.unwrap();
    assert_eq!(tracker.progression().current_xp, 0);
}
