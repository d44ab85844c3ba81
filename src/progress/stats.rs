//! User activity counters
//!
//! `UserStats` is the stat snapshot every achievement and challenge rule is
//! evaluated against. The mutators here are pure; persistence and
//! re-evaluation are driven by the tracker.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::streaks::next_streak;

/// Minutes of focus credited per completed task
pub const DEFAULT_MINUTES_PER_TASK: u32 = 30;

/// Sessions starting before this local hour count as early sessions
pub const DEFAULT_EARLY_SESSION_CUTOFF_HOUR: u32 = 8;

/// Score (in percent) that extends the quiz high-score streak
pub const PERFECT_QUIZ_SCORE: u8 = 100;

/// Snapshot of a single task as reported by the task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default)]
    pub completed: bool,
    /// Subject label; tasks without one (absent or null) are grouped under ""
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaskSnapshot {
    pub fn new(subject: impl Into<String>, completed: bool) -> Self {
        Self {
            completed,
            subject: subject.into(),
        }
    }
}

/// "Tasks changed" notification from the task-owning collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksChanged {
    #[serde(default)]
    pub completed_tasks_count: u32,
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
}

impl TasksChanged {
    /// Build a notification from a task list, counting completed tasks
    pub fn from_tasks(tasks: Vec<TaskSnapshot>) -> Self {
        let completed_tasks_count = tasks.iter().filter(|t| t.completed).count() as u32;
        Self {
            completed_tasks_count,
            tasks,
        }
    }
}

/// Durable activity counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub completed_tasks: u32,
    pub focus_time_minutes: u32,
    pub flashcards_created: u32,
    pub early_sessions_count: u32,
    pub streak_days: u32,
    pub subject_counts: BTreeMap<String, u32>,
    pub high_score_streak: u32,
    pub longest_session_minutes: u32,
    pub last_active_day: Option<NaiveDate>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            completed_tasks: 0,
            focus_time_minutes: 0,
            flashcards_created: 0,
            early_sessions_count: 0,
            streak_days: 1,
            subject_counts: BTreeMap::new(),
            high_score_streak: 0,
            longest_session_minutes: 0,
            last_active_day: None,
        }
    }
}

impl UserStats {
    /// Rebuild task-derived counters from a full task snapshot.
    ///
    /// Subject counts are recomputed from scratch on every call. Focus time is
    /// a fixed per-task proxy, not measured time.
    pub fn apply_tasks(&mut self, event: &TasksChanged, minutes_per_task: u32) {
        let mut subject_counts = BTreeMap::new();
        for task in event.tasks.iter().filter(|t| t.completed) {
            *subject_counts.entry(task.subject.clone()).or_insert(0) += 1;
        }

        self.subject_counts = subject_counts;
        self.completed_tasks = event.completed_tasks_count;
        self.focus_time_minutes = event.completed_tasks_count.saturating_mul(minutes_per_task);
    }

    /// Record a finished focus session
    pub fn record_focus_session(&mut self, minutes: u32, start_hour: u32, early_cutoff_hour: u32) {
        self.longest_session_minutes = self.longest_session_minutes.max(minutes);
        if start_hour < early_cutoff_hour {
            self.early_sessions_count = self.early_sessions_count.saturating_add(1);
        }
    }

    pub fn record_flashcards(&mut self, count: u32) {
        self.flashcards_created = self.flashcards_created.saturating_add(count);
    }

    /// A perfect score extends the high-score streak, anything else breaks it
    pub fn record_quiz_result(&mut self, score_percent: u8) {
        if score_percent >= PERFECT_QUIZ_SCORE {
            self.high_score_streak = self.high_score_streak.saturating_add(1);
        } else {
            self.high_score_streak = 0;
        }
    }

    /// Mark `day` as a study day, extending or restarting the streak
    pub fn record_activity(&mut self, day: NaiveDate) {
        if let Some(streak) = next_streak(self.streak_days, self.last_active_day, day) {
            self.streak_days = streak;
            self.last_active_day = Some(day);
        }
    }

    /// Highest completed-task count across subjects (0 when there are none)
    pub fn top_subject_count(&self) -> u32 {
        self.subject_counts.values().copied().max().unwrap_or(0)
    }
}

/// A counter that rules can be expressed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatMetric {
    CompletedTasks,
    FocusTimeMinutes,
    FlashcardsCreated,
    EarlySessions,
    StreakDays,
    TopSubjectCount,
    HighScoreStreak,
    LongestSessionMinutes,
}

impl StatMetric {
    /// Read the metric from a stat snapshot
    pub fn read(self, stats: &UserStats) -> u32 {
        match self {
            Self::CompletedTasks => stats.completed_tasks,
            Self::FocusTimeMinutes => stats.focus_time_minutes,
            Self::FlashcardsCreated => stats.flashcards_created,
            Self::EarlySessions => stats.early_sessions_count,
            Self::StreakDays => stats.streak_days,
            Self::TopSubjectCount => stats.top_subject_count(),
            Self::HighScoreStreak => stats.high_score_streak,
            Self::LongestSessionMinutes => stats.longest_session_minutes,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompletedTasks => "completed tasks",
            Self::FocusTimeMinutes => "focus minutes",
            Self::FlashcardsCreated => "flashcards",
            Self::EarlySessions => "early sessions",
            Self::StreakDays => "streak days",
            Self::TopSubjectCount => "tasks in one subject",
            Self::HighScoreStreak => "perfect quizzes in a row",
            Self::LongestSessionMinutes => "minutes in one session",
        }
    }
}
