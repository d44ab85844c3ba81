//! Progress service
//!
//! Runs a [`ProgressTracker`] inside a single tokio task. Callers talk to it
//! through a cloneable [`ProgressHandle`]; every command is applied to
//! completion before the next one, and the day-boundary tick runs in the same
//! loop, so evaluate / credit / mark-complete never interleave.
//!
//! Gamification events are published on a broadcast channel for toast-style
//! consumers in addition to being returned to the caller. A tick that crosses
//! into a new day publishes [`GamificationEvent::ChallengesReset`].

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::progress::{
    today, ChallengeId, ClaimError, GamificationEvent, ProgressTracker, ProgressView,
    TasksChanged,
};

/// Capacity of the command queue
const COMMAND_BUFFER: usize = 64;

/// Capacity of the event broadcast buffer
const EVENT_BUFFER: usize = 128;

/// Errors returned by [`ProgressHandle`]
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Progress service has stopped")]
    Stopped,

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// Source of the current local date for day-boundary checks
pub type Clock = fn() -> NaiveDate;

type Reply<T> = oneshot::Sender<T>;

/// Commands handled by the service loop
enum Command {
    TasksChanged(TasksChanged, Reply<Vec<GamificationEvent>>),
    FocusSession {
        minutes: u32,
        started_at: NaiveDateTime,
        reply: Reply<Vec<GamificationEvent>>,
    },
    Flashcards(u32, Reply<Vec<GamificationEvent>>),
    QuizResult(u8, Reply<Vec<GamificationEvent>>),
    Claim(ChallengeId, Reply<Result<Vec<GamificationEvent>, ClaimError>>),
    CheckDailyReset(Reply<bool>),
    View(Reply<ProgressView>),
    Reset(Reply<()>),
    Shutdown,
}

/// Handle to a running progress service
#[derive(Clone)]
pub struct ProgressHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GamificationEvent>,
}

impl ProgressHandle {
    /// Receive every gamification event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<GamificationEvent> {
        self.event_tx.subscribe()
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> Result<T, ServiceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| ServiceError::Stopped)?;
        reply_rx.await.map_err(|_| ServiceError::Stopped)
    }

    pub async fn tasks_changed(&self, event: TasksChanged) -> Result<Vec<GamificationEvent>, ServiceError> {
        self.request(|reply| Command::TasksChanged(event, reply)).await
    }

    pub async fn record_focus_session(
        &self,
        minutes: u32,
        started_at: NaiveDateTime,
    ) -> Result<Vec<GamificationEvent>, ServiceError> {
        self.request(|reply| Command::FocusSession {
            minutes,
            started_at,
            reply,
        })
        .await
    }

    pub async fn record_flashcards_created(&self, count: u32) -> Result<Vec<GamificationEvent>, ServiceError> {
        self.request(|reply| Command::Flashcards(count, reply)).await
    }

    pub async fn record_quiz_result(&self, score_percent: u8) -> Result<Vec<GamificationEvent>, ServiceError> {
        self.request(|reply| Command::QuizResult(score_percent, reply)).await
    }

    pub async fn claim_challenge(&self, id: ChallengeId) -> Result<Vec<GamificationEvent>, ServiceError> {
        Ok(self.request(|reply| Command::Claim(id, reply)).await??)
    }

    /// Run the day-boundary check now instead of waiting for the next tick
    pub async fn check_daily_reset(&self) -> Result<bool, ServiceError> {
        self.request(Command::CheckDailyReset).await
    }

    pub async fn view(&self) -> Result<ProgressView, ServiceError> {
        self.request(Command::View).await
    }

    pub async fn reset_all(&self) -> Result<(), ServiceError> {
        self.request(Command::Reset).await
    }

    /// Ask the service to stop; pending commands queued before this are still handled
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }
}

/// Start the progress service in a background task.
///
/// The join handle yields the tracker back once the service stops (after
/// `shutdown` or when every handle is dropped).
pub fn start_progress_service(
    tracker: ProgressTracker,
    tick_interval: Duration,
) -> (ProgressHandle, JoinHandle<ProgressTracker>) {
    start_progress_service_with_clock(tracker, tick_interval, today)
}

/// Start the progress service with an explicit date source
pub fn start_progress_service_with_clock(
    tracker: ProgressTracker,
    tick_interval: Duration,
    clock: Clock,
) -> (ProgressHandle, JoinHandle<ProgressTracker>) {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

    let handle = ProgressHandle {
        command_tx,
        event_tx: event_tx.clone(),
    };

    let task = tokio::spawn(run_service(tracker, command_rx, event_tx, tick_interval, clock));
    (handle, task)
}

async fn run_service(
    mut tracker: ProgressTracker,
    mut command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GamificationEvent>,
    tick_interval: Duration,
    clock: Clock,
) -> ProgressTracker {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Progress service started (tick every {:?})", tick_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                roll_day(&mut tracker, clock, &event_tx);
            }
            command = command_rx.recv() => {
                let Some(command) = command else {
                    break;
                };
                if !handle_command(&mut tracker, command, &event_tx, clock) {
                    break;
                }
            }
        }
    }

    info!("Progress service stopped");
    tracker
}

/// Run the day-boundary check, publishing a reset event when a new day began
fn roll_day(
    tracker: &mut ProgressTracker,
    clock: Clock,
    event_tx: &broadcast::Sender<GamificationEvent>,
) -> bool {
    let date = clock();
    if !tracker.check_daily_reset_on(date) {
        return false;
    }

    debug!("Day boundary crossed, daily challenges cleared");
    let _ = event_tx.send(GamificationEvent::ChallengesReset { date });
    true
}

/// Apply one command. Returns false when the loop should stop.
fn handle_command(
    tracker: &mut ProgressTracker,
    command: Command,
    event_tx: &broadcast::Sender<GamificationEvent>,
    clock: Clock,
) -> bool {
    let publish = |events: Vec<GamificationEvent>| {
        for event in &events {
            // No subscribers is fine
            let _ = event_tx.send(event.clone());
        }
        events
    };

    match command {
        Command::TasksChanged(event, reply) => {
            let _ = reply.send(publish(tracker.tasks_changed(&event)));
        }
        Command::FocusSession {
            minutes,
            started_at,
            reply,
        } => {
            let _ = reply.send(publish(tracker.record_focus_session(minutes, started_at)));
        }
        Command::Flashcards(count, reply) => {
            let _ = reply.send(publish(tracker.record_flashcards_created(count)));
        }
        Command::QuizResult(score, reply) => {
            let _ = reply.send(publish(tracker.record_quiz_result(score)));
        }
        Command::Claim(id, reply) => {
            let _ = reply.send(tracker.claim_challenge(id).map(publish));
        }
        Command::CheckDailyReset(reply) => {
            let _ = reply.send(roll_day(tracker, clock, event_tx));
        }
        Command::View(reply) => {
            let _ = reply.send(tracker.view());
        }
        Command::Reset(reply) => {
            tracker.reset_all();
            let _ = reply.send(());
        }
        Command::Shutdown => return false,
    }

    true
}
