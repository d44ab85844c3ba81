//! Status command implementation

use anyhow::Result;

use studyquest::ProgressView;

use super::CliContext;

/// Show level, XP, achievements and today's challenges
pub fn status_command(ctx: &CliContext, json: bool) -> Result<()> {
    let view = ctx.open_tracker()?.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view);
    Ok(())
}

fn print_view(view: &ProgressView) {
    println!(
        "Level {} - {} ({} XP, next level at {} XP, {:.0}%)",
        view.level,
        view.title,
        view.current_xp,
        view.next_level_xp,
        view.level_progress.percentage
    );
    println!("Streak: {} day(s)\n", view.streak_days);

    println!(
        "Achievements ({}/{}):",
        view.unlocked_count, view.total_achievements
    );
    for a in &view.achievements {
        let mark = if a.completed { "x" } else { " " };
        let progress = a
            .progress
            .map(|p| format!(" [{}/{} {}]", p.progress, p.total, a.metric.label()))
            .unwrap_or_default();
        println!(
            "  [{}] {} {} (+{} XP) - {}{}",
            mark, a.icon, a.name, a.xp_reward, a.description, progress
        );
    }

    println!();
    match view.challenges_date {
        Some(date) => println!("Daily challenges for {}:", date),
        None => println!("Daily challenges:"),
    }
    for c in &view.challenges {
        let state = if c.completed {
            "done"
        } else if c.claimable {
            "claimable"
        } else {
            "open"
        };
        println!(
            "  #{} {} {} (+{} XP) [{}/{} {}] {}",
            c.id,
            c.icon,
            c.name,
            c.xp_reward,
            c.progress.progress,
            c.progress.total,
            c.metric.label(),
            state
        );
    }
}
