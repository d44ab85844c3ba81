//! StudyQuest - progression engine for the study planner
//!
//! Turns study activity (completed tasks, focus sessions, flashcards, quizzes)
//! into experience points, levels, one-shot achievements and daily
//! challenges.
//!
//! ## Pieces
//!
//! 1. **[`progress`]**: the tracker that owns all progression state and
//!    evaluates achievement and challenge rules on every stat change.
//! 2. **[`store`]**: durable key-value records (SQLite or in-memory) the
//!    tracker writes through to.
//! 3. **[`service`]**: a tokio task wrapping the tracker, with a periodic
//!    day-boundary check and a broadcast channel of gamification events.

pub mod config;
pub mod progress;
pub mod service;
pub mod store;

pub use progress::*;
