//! Commands that feed activity into the tracker

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;

use studyquest::TasksChanged;

use super::{print_events, CliContext};

/// Apply a task snapshot read from a JSON file
pub fn tasks_command(ctx: &CliContext, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read task snapshot: {}", file.display()))?;
    let event: TasksChanged = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse task snapshot: {}", file.display()))?;

    let mut tracker = ctx.open_tracker()?;
    print_events(&tracker.tasks_changed(&event));
    Ok(())
}

/// Record a focus session, started now or at `at` (HH:MM, local) today
pub fn focus_command(ctx: &CliContext, minutes: u32, at: Option<&str>) -> Result<()> {
    let started_at = match at {
        Some(at) => {
            let time = NaiveTime::parse_from_str(at, "%H:%M")
                .with_context(|| format!("Invalid start time '{}', expected HH:MM", at))?;
            studyquest::today().and_time(time)
        }
        None => studyquest::now_local(),
    };

    let mut tracker = ctx.open_tracker()?;
    print_events(&tracker.record_focus_session(minutes, started_at));
    Ok(())
}

pub fn flashcards_command(ctx: &CliContext, count: u32) -> Result<()> {
    let mut tracker = ctx.open_tracker()?;
    print_events(&tracker.record_flashcards_created(count));
    Ok(())
}

pub fn quiz_command(ctx: &CliContext, score: u8) -> Result<()> {
    let mut tracker = ctx.open_tracker()?;
    print_events(&tracker.record_quiz_result(score));
    Ok(())
}

/// Manually claim a daily challenge
pub fn claim_command(ctx: &CliContext, id: u32) -> Result<()> {
    let mut tracker = ctx.open_tracker()?;
    match tracker.claim_challenge_number(id) {
        Ok(events) => print_events(&events),
        Err(e) => bail!("Cannot claim challenge: {}", e),
    }
    Ok(())
}

pub fn reset_command(ctx: &CliContext, force: bool) -> Result<()> {
    if !force {
        println!("This deletes all XP, stats, achievements and today's challenges.");
        println!("Run again with --force to confirm.");
        return Ok(());
    }

    let mut tracker = ctx.open_tracker()?;
    tracker.reset_all();
    println!("All progress has been reset.");
    Ok(())
}
